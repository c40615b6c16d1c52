//! Writes one file per bucket.
//!
//! Emission runs in two phases. [`plan`] is synchronous: it assigns ordinals,
//! resolves every target path and composes every file body. [`emit_all`] then
//! writes the planned files concurrently and fails on the first error.

mod content;
mod dirs;
mod error;
mod naming;

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::bucket::Buckets;

pub use content::compose;
pub use dirs::ensure_dir_chain;
pub use error::EmitError;
pub use naming::{file_id, normalize, Target};

/// Stem and directory used when no output path is configured.
pub const DEFAULT_NAME: &str = "mqwriter";

/// Settings shared by every emission of one invocation.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Base location that output paths resolve against.
    pub root: PathBuf,
    /// Output base path: a directory, or a directory plus file name.
    pub to: Option<PathBuf>,
    pub default_name: String,
    /// Strip whitespace from rule text (default: true).
    pub compress: bool,
    /// Prepended to every file, before the marker comment.
    pub banner: String,
    /// Name files after the sanitized condition instead of an ordinal.
    pub descriptive: bool,
}

impl EmitOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            to: None,
            default_name: DEFAULT_NAME.to_string(),
            compress: true,
            banner: String::new(),
            descriptive: false,
        }
    }

    pub fn with_to(mut self, to: impl Into<PathBuf>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_descriptive(mut self, descriptive: bool) -> Self {
        self.descriptive = descriptive;
        self
    }

    pub fn target(&self) -> Target {
        let to = self
            .to
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.default_name));
        Target::resolve(&self.root, &to, &self.default_name)
    }
}

/// One file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// 1-based position in emission order.
    pub ordinal: usize,
    pub condition: String,
    pub path: PathBuf,
    pub contents: String,
}

impl Emission {
    pub async fn write(&self) -> Result<(), EmitError> {
        if let Some(dir) = self.path.parent() {
            ensure_dir_chain(dir).await?;
        }
        fs::write(&self.path, &self.contents)
            .await
            .map_err(|source| EmitError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), condition = %self.condition, "wrote bucket");
        Ok(())
    }
}

/// Files written by one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Written path of every emission, in ordinal order. A path shared by
    /// several buckets appears once per bucket.
    pub files: Vec<PathBuf>,
}

impl EmitReport {
    pub fn count(&self) -> usize {
        self.files.len()
    }
}

/// Assigns ordinals and resolves the file for every bucket.
///
/// Buckets that map to the same file (a sanitized condition colliding with
/// another, or `@media none` beside the residual in descriptive mode) are all
/// kept; [`emit_all`] writes them in ordinal order so the last one wins.
pub fn plan(buckets: &Buckets, options: &EmitOptions) -> Vec<Emission> {
    let target = options.target();
    let mut seen: HashMap<PathBuf, String> = HashMap::new();
    let mut emissions = Vec::with_capacity(buckets.len());

    for (idx, bucket) in buckets.iter().enumerate() {
        let ordinal = idx + 1;
        let path = target.file_for(&bucket.key, ordinal, options.descriptive);
        let condition = bucket.key.to_string();
        if let Some(first) = seen.insert(path.clone(), condition.clone()) {
            warn!(
                path = %path.display(),
                %first,
                second = %condition,
                "media conditions share an output file; the later one overwrites it"
            );
        }
        emissions.push(Emission {
            ordinal,
            contents: compose(bucket, &options.banner, options.compress),
            condition,
            path,
        });
    }
    emissions
}

/// Writes every planned file concurrently.
///
/// Emissions sharing a path run in one task, in ordinal order. Returns the
/// first failure; tasks still running at that point are detached and files
/// already written stay on disk.
pub async fn emit_all(emissions: Vec<Emission>) -> Result<EmitReport, EmitError> {
    let mut by_path: Vec<Vec<Emission>> = Vec::new();
    let mut slots: HashMap<PathBuf, usize> = HashMap::new();
    for emission in emissions {
        match slots.get(&emission.path) {
            Some(&slot) => by_path[slot].push(emission),
            None => {
                slots.insert(emission.path.clone(), by_path.len());
                by_path.push(vec![emission]);
            }
        }
    }

    let mut tasks = JoinSet::new();
    for mut group in by_path {
        group.sort_by_key(|emission| emission.ordinal);
        tasks.spawn(async move {
            let mut done = Vec::with_capacity(group.len());
            for emission in group {
                emission.write().await?;
                done.push((emission.ordinal, emission.path));
            }
            Ok::<_, EmitError>(done)
        });
    }

    let mut written = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(EmitError::from).and_then(|result| result);
        match outcome {
            Ok(files) => written.extend(files),
            Err(err) => {
                tasks.detach_all();
                return Err(err);
            }
        }
    }

    written.sort_by_key(|(ordinal, _)| *ordinal);
    Ok(EmitReport {
        files: written.into_iter().map(|(_, path)| path).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::split;
    use crate::css::Stylesheet;

    fn buckets(css: &str) -> Buckets {
        split(&Stylesheet::parse(css)).buckets
    }

    #[test]
    fn ordinals_follow_bucket_order() {
        let options = EmitOptions::new("/base").with_to("out/app.css");
        let plan = plan(&buckets("@media b {.x{}} @media a {.y{}} .z{}"), &options);
        let files: Vec<_> = plan.iter().map(|e| (e.ordinal, e.path.clone())).collect();
        assert_eq!(
            files,
            vec![
                (1, PathBuf::from("/base/out/app-1.css")),
                (2, PathBuf::from("/base/out/app-2.css")),
                (3, PathBuf::from("/base/out/app.css")),
            ]
        );
        assert_eq!(plan[0].contents, "/*!mq|b*/.x{}");
    }

    #[test]
    fn default_target_uses_default_name_twice() {
        let options = EmitOptions::new("/base");
        let plan = plan(&buckets(".a{}"), &options);
        assert_eq!(plan[0].path, PathBuf::from("/base/mqwriter/mqwriter.css"));
    }

    #[test]
    fn colliding_descriptive_names_are_all_planned() {
        let options = EmitOptions::new("/base").with_descriptive(true);
        let plan = plan(&buckets("@media (a:b) {.x{}} @media (ab) {.y{}}"), &options);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].path, plan[1].path);
        assert_eq!(plan[0].path, PathBuf::from("/base/mqwriter/mqwriter-(ab).css"));
        assert_eq!(plan[1].condition, "(ab)");
    }

    #[tokio::test]
    async fn shared_path_is_written_in_ordinal_order() {
        let root = tempfile::TempDir::new().unwrap();
        let options = EmitOptions::new(root.path()).with_descriptive(true);
        let css = "@media none {.x{}} .y{}";

        for _ in 0..5 {
            let report = emit_all(plan(&buckets(css), &options)).await.unwrap();
            let path = root.path().join("mqwriter").join("mqwriter-none.css");
            assert_eq!(report.files, vec![path.clone(), path.clone()]);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "/*!mq|none*/.y{}");
        }
    }
}

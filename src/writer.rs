use tracing::debug;

use crate::bucket::{self, Split};
use crate::css::Stylesheet;
use crate::emit::{self, EmitError, EmitOptions, EmitReport};

/// Outcome of [`MediaQueryWriter::process`].
#[derive(Debug, Clone)]
pub struct Processed {
    /// The input stylesheet with every media block removed.
    pub residual: String,
    pub report: EmitReport,
}

/// Splits stylesheets into one file per media condition.
#[derive(Debug, Clone)]
pub struct MediaQueryWriter {
    options: EmitOptions,
}

impl MediaQueryWriter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Parses and buckets `css` without touching the filesystem.
    pub fn split(&self, css: &str) -> Split {
        bucket::split(&Stylesheet::parse(css))
    }

    /// Splits `css` and writes every bucket file.
    ///
    /// Ordinals start from 1 on every call.
    pub async fn process(&self, css: &str) -> Result<Processed, EmitError> {
        let split = self.split(css);
        debug!(buckets = split.buckets.len(), "bucketed stylesheet");

        let emissions = emit::plan(&split.buckets, &self.options);
        let report = emit::emit_all(emissions).await?;

        Ok(Processed {
            residual: split.residual.to_css(),
            report,
        })
    }
}

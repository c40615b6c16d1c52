use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::info;

use mqwriter::config::Config;
use mqwriter::logging::init_tracing;
use mqwriter::MediaQueryWriter;

#[derive(Debug, Parser)]
#[command(
    name = "mqwriter",
    version,
    about = "Split a stylesheet into one file per media query"
)]
struct Cli {
    /// Stylesheet to split (`-` or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output base path: a directory, or a directory plus file name
    #[arg(short = 'o', long)]
    to: Option<PathBuf>,

    /// Banner prepended to every output file
    #[arg(long)]
    banner: Option<String>,

    /// Name files after the sanitized media condition
    #[arg(long)]
    descriptive: bool,

    /// Keep whitespace in emitted files
    #[arg(long)]
    no_compress: bool,

    /// Config file (default: <root>/mqwriter.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for output paths (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Write the residual stylesheet here instead of stdout
    #[arg(long)]
    residual: Option<PathBuf>,

    /// Raise log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Applies command-line overrides on top of the file config.
    fn merge(&self, mut config: Config) -> Config {
        if let Some(to) = &self.to {
            config.to = Some(to.clone());
        }
        if let Some(banner) = &self.banner {
            config.banner = banner.clone();
        }
        if self.descriptive {
            config.descriptive = true;
        }
        if self.no_compress {
            config.compress = false;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(&root)?,
    };
    let config = cli.merge(config);

    let css = read_input(cli.input.as_deref()).await?;
    let writer = MediaQueryWriter::new(config.emit_options(&root));
    let processed = writer.process(&css).await?;

    for file in &processed.report.files {
        info!(path = %file.display(), "wrote");
    }
    info!(count = processed.report.count(), "split complete");

    match &cli.residual {
        Some(path) => tokio::fs::write(path, &processed.residual)
            .await
            .with_context(|| format!("Failed to write residual to '{}'", path.display()))?,
        None => print!("{}", processed.residual),
    }
    Ok(())
}

async fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display())),
        _ => {
            let mut css = String::new();
            tokio::io::stdin()
                .read_to_string(&mut css)
                .await
                .context("Failed to read stdin")?;
            Ok(css)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["mqwriter", "--no-compress", "--banner", "/*b*/", "-o", "x/y.css"]);
        let config = cli.merge(Config {
            banner: "/*file*/".to_string(),
            ..Config::default()
        });
        assert!(!config.compress);
        assert_eq!(config.banner, "/*b*/");
        assert_eq!(config.to, Some(PathBuf::from("x/y.css")));
        assert!(!config.descriptive);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cli = Cli::parse_from(["mqwriter", "in.css"]);
        let config = cli.merge(Config {
            compress: false,
            descriptive: true,
            ..Config::default()
        });
        assert!(!config.compress);
        assert!(config.descriptive);
        assert_eq!(cli.input, Some(PathBuf::from("in.css")));
    }
}

//! alist_crawl CLI - Crawl an AList file server.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use alist_crawl::{write_inventory, AlistClient, ClientConfig, Crawler};

/// CLI tool for crawling an AList file server.
#[derive(Parser)]
#[command(name = "alist_crawl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the AList server.
    #[arg(long, env = "ALIST_URL")]
    base_url: String,

    /// Retries per request after the first attempt fails.
    #[arg(long, env = "ALIST_MAX_RETRIES", default_value_t = 5)]
    max_retries: u32,

    /// Seconds to wait between retries.
    #[arg(long, env = "ALIST_RETRY_DELAY", default_value_t = 1.0)]
    retry_delay: f64,

    #[command(subcommand)]
    command: Commands,
}

/// Where to start and how deep to go.
#[derive(Args)]
struct WalkArgs {
    /// Remote path to start from.
    #[arg(default_value = "/")]
    path: String,

    /// Maximum depth to descend; -1 for unlimited.
    #[arg(
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-1..)
    )]
    max_depth: i64,
}

impl WalkArgs {
    fn max_depth(&self) -> Option<usize> {
        usize::try_from(self.max_depth).ok()
    }

    fn root(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the directory tree.
    Tree {
        #[command(flatten)]
        walk: WalkArgs,

        /// Resolve and print each file's download URL.
        #[arg(long)]
        urls: bool,
    },

    /// Save an inventory of all files to a JSON file.
    Export {
        #[command(flatten)]
        walk: WalkArgs,

        /// Include directories in the inventory.
        #[arg(long)]
        include_dirs: bool,

        /// Output file.
        #[arg(long, short = 'o', default_value = "files_info.json")]
        output: PathBuf,
    },

    /// Print the tree with URLs, then export an inventory including directories.
    Crawl {
        #[command(flatten)]
        walk: WalkArgs,

        /// Output file.
        #[arg(long, short = 'o', default_value = "files_info.json")]
        output: PathBuf,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let retry_delay = Duration::try_from_secs_f64(cli.retry_delay)
        .with_context(|| format!("Invalid retry delay: {}", cli.retry_delay))?;
    let config = ClientConfig {
        max_retries: cli.max_retries,
        retry_delay,
    };
    let client = AlistClient::with_config(&cli.base_url, config);

    match cli.command {
        Commands::Tree { walk, urls } => {
            let crawler = Crawler::new(client).with_max_depth(walk.max_depth());
            print_tree(&crawler, &walk, urls).await?;
        }

        Commands::Export {
            walk,
            include_dirs,
            output,
        } => {
            let crawler = Crawler::new(client).with_max_depth(walk.max_depth());
            export(&crawler, &walk, include_dirs, &output).await?;
        }

        Commands::Crawl { walk, output } => {
            let crawler = Crawler::new(client).with_max_depth(walk.max_depth());
            print_tree(&crawler, &walk, true).await?;
            println!("\nCollecting file information...");
            export(&crawler, &walk, true, &output).await?;
        }
    }

    Ok(())
}

async fn print_tree(crawler: &Crawler<AlistClient>, walk: &WalkArgs, urls: bool) -> Result<()> {
    let depth = match walk.max_depth() {
        Some(depth) => depth.to_string(),
        None => "unlimited".to_string(),
    };
    println!("Listing {} (max depth: {})", walk.root(), depth);
    println!("Note: ⚠️ marks directories that could not be accessed");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    crawler
        .print_tree(&walk.root(), urls, &mut out)
        .await
        .context("Failed to write tree to stdout")?;
    out.flush()?;
    Ok(())
}

async fn export(
    crawler: &Crawler<AlistClient>,
    walk: &WalkArgs,
    include_dirs: bool,
    output: &Path,
) -> Result<()> {
    let records = crawler.collect(&walk.root(), include_dirs).await;

    if records.is_empty() {
        println!("No file information retrieved.");
        return Ok(());
    }

    write_inventory(output, &records)
        .with_context(|| format!("Failed to write inventory to {:?}", output))?;

    let inaccessible = records.iter().filter(|r| !r.is_accessible()).count();
    info!(records = records.len(), inaccessible, "inventory written");
    println!("Saved {} item(s) to {:?}", records.len(), output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(path: &str, max_depth: i64) -> WalkArgs {
        WalkArgs {
            path: path.to_string(),
            max_depth,
        }
    }

    #[test]
    fn test_max_depth_unlimited() {
        assert_eq!(walk("/", -1).max_depth(), None);
    }

    #[test]
    fn test_max_depth_limited() {
        assert_eq!(walk("/", 0).max_depth(), Some(0));
        assert_eq!(walk("/", 4).max_depth(), Some(4));
    }

    #[test]
    fn test_root_gets_leading_slash() {
        assert_eq!(walk("docs", -1).root(), "/docs");
        assert_eq!(walk("/docs", -1).root(), "/docs");
    }

    #[test]
    fn test_cli_parses_negative_depth() {
        let cli = Cli::try_parse_from([
            "alist_crawl",
            "--base-url",
            "http://localhost:5244",
            "tree",
            "--max-depth",
            "-1",
        ])
        .unwrap();

        match cli.command {
            Commands::Tree { walk, urls } => {
                assert_eq!(walk.max_depth(), None);
                assert!(!urls);
            }
            _ => panic!("expected tree command"),
        }
    }

    #[test]
    fn test_cli_rejects_depth_below_minus_one() {
        let result = Cli::try_parse_from([
            "alist_crawl",
            "--base-url",
            "http://localhost:5244",
            "tree",
            "--max-depth",
            "-5",
        ]);
        assert!(result.is_err());
    }
}

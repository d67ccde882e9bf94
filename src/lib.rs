//! alist_crawl - Crawl the directory tree of an AList file server.
//!
//! This library provides functionality to:
//! - List directories through the AList JSON API, with retries and fallbacks
//!   for password-protected folders and space-encoding quirks
//! - Resolve direct download URLs for files
//! - Walk a tree depth-first, printing it or collecting an inventory
//!
//! # Example
//!
//! ```no_run
//! use alist_crawl::{write_inventory, AlistClient, Crawler};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AlistClient::new("https://pan.example.com");
//!     let crawler = Crawler::new(client).with_max_depth(Some(4));
//!
//!     let records = crawler.collect("/", true).await;
//!     write_inventory("files_info.json", &records)?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod crawler;
pub mod error;
pub mod file_type;
pub mod inventory;
pub mod models;
pub mod path;

// Re-exports for convenience
pub use client::{AlistClient, ClientConfig, FsApi};
pub use crawler::Crawler;
pub use error::{CrawlError, Result};
pub use inventory::write_inventory;
pub use models::{DirectoryRecord, FileRecord, Listing, ListingEntry, Record};

//! Depth-first traversal of a remote directory tree.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::client::FsApi;
use crate::file_type;
use crate::models::{format_size, DirectoryRecord, FileRecord, Listing, ListingEntry, Record};
use crate::path;

/// Walks a remote tree through an [`FsApi`].
///
/// Entries are visited in pre-order, siblings in the order the server
/// returns them. A directory is only descended into when its own listing
/// comes back non-empty; an empty listing marks it as inaccessible.
pub struct Crawler<A> {
    api: A,
    max_depth: Option<usize>,
}

impl<A: FsApi> Crawler<A> {
    /// Create a crawler with no depth limit.
    pub fn new(api: A) -> Self {
        Self {
            api,
            max_depth: None,
        }
    }

    /// Limit how deep the walk goes. `Some(0)` lists the root only;
    /// `None` is unlimited.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn can_descend(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    /// Collect an inventory of everything under `root`.
    ///
    /// # Arguments
    /// * `root` - Path to start from, beginning with `/`
    /// * `include_dirs` - Whether directories get their own records
    pub async fn collect(&self, root: &str, include_dirs: bool) -> Vec<Record> {
        let listing = self.api.list(root).await;
        let mut records = Vec::new();
        self.collect_listing(root, listing, 0, include_dirs, &mut records)
            .await;
        records
    }

    // `listing` is the probe result for `parent`; it is walked as is rather
    // than listed a second time on entry.
    async fn collect_listing(
        &self,
        parent: &str,
        listing: Listing,
        depth: usize,
        include_dirs: bool,
        records: &mut Vec<Record>,
    ) {
        for raw in listing.content {
            let entry = match ListingEntry::from_value(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = parent, error = %e, "skipping malformed entry");
                    continue;
                }
            };
            let current = path::join(parent, &entry.name);

            if !entry.is_dir {
                let url = self.api.download_url(&current).await;
                records.push(Record::File(FileRecord::new(&entry, &current, url)));
                continue;
            }

            let slot = include_dirs.then(|| {
                records.push(Record::Directory(DirectoryRecord::new(&entry.name, &current)));
                records.len() - 1
            });

            if !self.can_descend(depth) {
                continue;
            }

            let sub = self.api.list(&current).await;
            if sub.is_empty() {
                warn!(path = %current, "directory is empty or inaccessible");
                if let Some(Record::Directory(dir)) = slot.and_then(|i| records.get_mut(i)) {
                    dir.accessible = false;
                }
            } else {
                Box::pin(self.collect_listing(&current, sub, depth + 1, include_dirs, records))
                    .await;
            }
        }
    }

    /// Print an indented tree of everything under `root` to `out`.
    ///
    /// With `with_urls` set, each file line is followed by its download URL
    /// or a failure marker.
    pub async fn print_tree<W: Write>(&self, root: &str, with_urls: bool, out: &mut W) -> io::Result<()> {
        let listing = self.api.list(root).await;
        self.print_listing(root, listing, 0, with_urls, out).await
    }

    // Same single-listing walk as `collect_listing`.
    async fn print_listing<W: Write>(
        &self,
        parent: &str,
        listing: Listing,
        depth: usize,
        with_urls: bool,
        out: &mut W,
    ) -> io::Result<()> {
        let indent = "  ".repeat(depth);
        let total = listing.len();

        if depth == 0 || !listing.is_empty() {
            writeln!(out, "\n{}📂 Path: {}", indent, parent)?;
            writeln!(out, "{}{}", indent, "-".repeat(30))?;
        }

        for raw in listing.content {
            let entry = match ListingEntry::from_value(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = parent, error = %e, "skipping malformed entry");
                    writeln!(out, "{}Error processing entry: {}", indent, e)?;
                    continue;
                }
            };
            let current = path::join(parent, &entry.name);
            let icon = file_type::icon(&entry.name, entry.is_dir);

            if !entry.is_dir {
                writeln!(out, "{}{} {} ({})", indent, icon, entry.name, format_size(entry.size))?;
                if with_urls {
                    match self.api.download_url(&current).await {
                        Some(url) => writeln!(out, "{}  🔗 URL: {}", indent, url)?,
                        None => writeln!(out, "{}  ❌ URL unavailable", indent)?,
                    }
                }
                continue;
            }

            writeln!(out, "{}{} {}", indent, icon, entry.name)?;
            if !self.can_descend(depth) {
                debug!(path = %current, "depth limit reached");
                continue;
            }

            let sub = self.api.list(&current).await;
            if sub.is_empty() {
                warn!(path = %current, "directory is empty or inaccessible");
                writeln!(out, "{}  ⚠️ Directory empty or inaccessible", indent)?;
            } else {
                Box::pin(self.print_listing(&current, sub, depth + 1, with_urls, out)).await?;
            }
        }

        if depth == 0 {
            writeln!(out, "\nTotal: {} items", total)?;
        }

        Ok(())
    }
}

//! Data models for AList API requests, responses and crawl output.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::file_type::{self, DIRECTORY_TYPE};
use crate::path::encode_path;

/// Status code the API reports on success.
pub const SUCCESS_CODE: i64 = 200;

/// Body of `POST /api/fs/list`.
#[derive(Debug, Serialize)]
pub struct ListRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
    pub page: u32,
    pub per_page: u32,
    pub refresh: bool,
}

/// Body of `POST /api/fs/get`.
#[derive(Debug, Serialize)]
pub struct GetRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
}

/// Envelope shared by every AList response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Contents of a directory as returned by `/api/fs/list`.
///
/// Entries are kept as raw JSON so that one malformed row can be skipped
/// without losing the rest of the listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub content: Vec<Value>,
    #[serde(default)]
    pub total: u64,
}

fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl Listing {
    /// The listing returned when contents could not be determined.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default, deserialize_with = "deserialize_modified")]
    pub modified: String,
}

fn deserialize_modified<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl ListingEntry {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// Payload of `/api/fs/get`.
#[derive(Debug, Deserialize)]
pub struct DownloadInfo {
    #[serde(default)]
    pub raw_url: Option<String>,
}

/// Inventory entry for a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub encoded_path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub icon: String,
    pub size: u64,
    pub size_formatted: String,
    pub modified: String,
    pub url: Option<String>,
    pub accessible: bool,
}

impl FileRecord {
    pub fn new(entry: &ListingEntry, path: &str, url: Option<String>) -> Self {
        Self {
            name: entry.name.clone(),
            path: path.to_string(),
            encoded_path: encode_path(path),
            file_type: file_type::classify(&entry.name).to_string(),
            icon: file_type::icon(&entry.name, false).to_string(),
            size: entry.size,
            size_formatted: format_size(entry.size),
            modified: entry.modified.clone(),
            accessible: url.is_some(),
            url,
        }
    }
}

/// Inventory entry for a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryRecord {
    pub name: String,
    pub path: String,
    pub encoded_path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub icon: String,
    pub accessible: bool,
}

impl DirectoryRecord {
    /// A directory record, optimistically marked accessible.
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            encoded_path: encode_path(path),
            entry_type: DIRECTORY_TYPE.to_string(),
            icon: file_type::icon(name, true).to_string(),
            accessible: true,
        }
    }
}

/// One element of the crawl inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Directory(DirectoryRecord),
    File(FileRecord),
}

impl Record {
    pub fn path(&self) -> &str {
        match self {
            Record::Directory(dir) => &dir.path,
            Record::File(file) => &file.path,
        }
    }

    pub fn is_accessible(&self) -> bool {
        match self {
            Record::Directory(dir) => dir.accessible,
            Record::File(file) => file.accessible,
        }
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.2}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2}PB", size)
}

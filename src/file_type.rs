//! Extension based file classification and icon lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Type tag for files whose extension is missing or not in the table.
pub const DEFAULT_TYPE: &str = "default";

/// Type tag for directories.
pub const DIRECTORY_TYPE: &str = "directory";

const DEFAULT_ICON: &str = "📄";
const DIRECTORY_ICON: &str = "📁";

/// Known type tags and their icons.
static ICONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Video
        ("video", "🎬"),
        ("mp4", "🎬"),
        ("mkv", "🎬"),
        ("avi", "🎬"),
        ("mov", "🎬"),
        // Audio
        ("audio", "🎵"),
        ("mp3", "🎵"),
        ("wav", "🎵"),
        ("flac", "🎵"),
        // Images
        ("image", "🖼️"),
        ("jpg", "🖼️"),
        ("jpeg", "🖼️"),
        ("png", "🖼️"),
        ("gif", "🖼️"),
        ("webp", "🖼️"),
        // Documents
        ("pdf", "📄"),
        ("doc", "📝"),
        ("docx", "📝"),
        ("xls", "📊"),
        ("xlsx", "📊"),
        ("ppt", "📽️"),
        ("pptx", "📽️"),
        ("txt", "📝"),
        // Archives
        ("zip", "📦"),
        ("rar", "📦"),
        ("tar", "📦"),
        ("7z", "📦"),
        ("gz", "📦"),
        // Source code
        ("py", "🐍"),
        ("java", "☕"),
        ("js", "📜"),
        ("html", "🌐"),
        ("css", "🎨"),
        ("json", "📋"),
        // Executables and disk images
        ("exe", "⚙️"),
        ("msi", "⚙️"),
        ("dmg", "⚙️"),
        ("iso", "💿"),
        ("img", "💿"),
        (DEFAULT_TYPE, DEFAULT_ICON),
    ])
});

/// Classify a file by its extension, case-insensitively.
///
/// # Examples
///
/// ```
/// use alist_crawl::file_type::classify;
///
/// assert_eq!(classify("FOO.JPG"), "jpg");
/// assert_eq!(classify("README"), "default");
/// ```
pub fn classify(filename: &str) -> &'static str {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return DEFAULT_TYPE;
    };

    ICONS
        .get_key_value(ext.to_lowercase().as_str())
        .map(|(tag, _)| *tag)
        .unwrap_or(DEFAULT_TYPE)
}

/// Icon for an entry.
pub fn icon(filename: &str, is_dir: bool) -> &'static str {
    if is_dir {
        return DIRECTORY_ICON;
    }
    ICONS.get(classify(filename)).copied().unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known() {
        assert_eq!(classify("a.txt"), "txt");
        assert_eq!(classify("b.pdf"), "pdf");
        assert_eq!(classify("archive.tar.gz"), "gz");
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify("FOO.JPG"), classify("foo.jpg"));
        assert_eq!(classify("Movie.MKV"), "mkv");
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("Makefile"), DEFAULT_TYPE);
        assert_eq!(classify("data.xyz"), DEFAULT_TYPE);
        assert_eq!(classify("trailing."), DEFAULT_TYPE);
        assert_eq!(classify(".bashrc"), DEFAULT_TYPE);
    }

    #[test]
    fn test_directory_is_not_a_file_type() {
        assert_eq!(classify("weird.directory"), DEFAULT_TYPE);
    }

    #[test]
    fn test_icon() {
        assert_eq!(icon("docs", true), DIRECTORY_ICON);
        assert_eq!(icon("song.MP3", false), "🎵");
        assert_eq!(icon("unknown.bin", false), DEFAULT_ICON);
    }
}

//! Helpers for slash-delimited remote paths.

/// How spaces are escaped when a path is sent to the server.
///
/// Some storage drivers only resolve one of the two forms, so the client
/// tries `Percent` first and falls back to `Plus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceEncoding {
    Percent,
    Plus,
}

impl SpaceEncoding {
    pub fn apply(self, path: &str) -> String {
        match self {
            SpaceEncoding::Percent => path.replace(' ', "%20"),
            SpaceEncoding::Plus => path.replace(' ', "+"),
        }
    }
}

/// Join a child name onto a parent path.
///
/// Trailing slashes on the parent are dropped, so `/` + `docs` is `/docs`.
pub fn join(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}

/// Encode a path for the persisted inventory.
///
/// Each non-empty segment has its spaces replaced with `%20`; every other
/// character, including non-ASCII, is left as is.
pub fn encode_path(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace(' ', "%20"))
        .collect();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root() {
        assert_eq!(join("/", "docs"), "/docs");
        assert_eq!(join("/docs/", "b.pdf"), "/docs/b.pdf");
        assert_eq!(join("/docs", "b.pdf"), "/docs/b.pdf");
    }

    #[test]
    fn test_space_encoding() {
        assert_eq!(SpaceEncoding::Percent.apply("/my dir/a b.txt"), "/my%20dir/a%20b.txt");
        assert_eq!(SpaceEncoding::Plus.apply("/my dir/a b.txt"), "/my+dir/a+b.txt");
        assert_eq!(SpaceEncoding::Plus.apply("/plain"), "/plain");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/my dir/a b.txt"), "/my%20dir/a%20b.txt");
        assert_eq!(encode_path("/电影/新 建.mp4"), "/电影/新%20建.mp4");
        assert_eq!(encode_path("//a//b/"), "/a/b");
        assert_eq!(encode_path("/"), "/");
    }
}

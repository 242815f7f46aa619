//! Content-addressed storage paths

/// Where an upload lands inside the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObjectLocation {
    /// Percent-encoded directory segments, in order
    pub directory: Vec<String>,
    /// `<dedup hash>.<extension>`
    pub file_name: String,
}

impl StoredObjectLocation {
    /// Derive the storage location for a file.
    ///
    /// The file name comes from the content hash, so the caller's name only
    /// contributes its extension.
    pub fn build(raw_path: &str, dedup_hash: &str, original_name: &str) -> Self {
        Self {
            directory: encode_segments(raw_path),
            file_name: format!("{}.{}", dedup_hash, file_extension(original_name)),
        }
    }

    /// Encoded directory path, without leading or trailing slash
    pub fn directory_path(&self) -> String {
        self.directory.join("/")
    }

    /// Repository-relative path of the stored file
    pub fn full_path(&self) -> String {
        if self.directory.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.directory_path(), self.file_name)
        }
    }
}

/// Split a raw path on `/`, drop empty segments and percent-encode each one.
pub fn encode_segments(raw_path: &str) -> Vec<String> {
    raw_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect()
}

/// Extension after the last `.`, or an empty string when there is none.
pub fn file_extension(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "b1946ac92492d2347c6235b4d2611184";

    #[test]
    fn test_empty_segments_collapse() {
        let location = StoredObjectLocation::build("a//b/", HASH, "photo.png");
        assert_eq!(location.directory_path(), "a/b");
        assert_eq!(location.full_path(), format!("a/b/{}.png", HASH));

        assert_eq!(encode_segments("/leading/trailing/"), vec!["leading", "trailing"]);
    }

    #[test]
    fn test_root_path() {
        for raw in ["", "/", "///"] {
            let location = StoredObjectLocation::build(raw, HASH, "notes.txt");
            assert!(location.directory.is_empty());
            assert_eq!(location.full_path(), format!("{}.txt", HASH));
        }
    }

    #[test]
    fn test_segments_encoded_individually() {
        let location = StoredObjectLocation::build("my docs/a?b#c/100%", HASH, "x.pdf");
        assert_eq!(location.directory, vec!["my%20docs", "a%3Fb%23c", "100%25"]);
        assert_eq!(
            location.full_path(),
            format!("my%20docs/a%3Fb%23c/100%25/{}.pdf", HASH)
        );
    }

    #[test]
    fn test_non_ascii_segment() {
        assert_eq!(encode_segments("图片"), vec!["%E5%9B%BE%E7%89%87"]);
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension(".bashrc"), "bashrc");
        assert_eq!(file_extension("trailing."), "");
        assert_eq!(file_extension("README"), "");
    }

    #[test]
    fn test_missing_extension_keeps_trailing_dot() {
        let location = StoredObjectLocation::build("docs", HASH, "README");
        assert_eq!(location.file_name, format!("{}.", HASH));
        assert_eq!(location.full_path(), format!("docs/{}.", HASH));
    }

    #[test]
    fn test_name_does_not_affect_file_stem() {
        let a = StoredObjectLocation::build("", HASH, "one.png");
        let b = StoredObjectLocation::build("", HASH, "two.png");
        assert_eq!(a, b);
    }
}

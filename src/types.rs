use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory value used when a path has no directory component.
pub const CURRENT_DIR: &str = ".";

/// A path split into the directory (never transformed) and the basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filename {
    /// Everything before the last `/`, kept verbatim. Empty means the root.
    pub directory: String,
    pub basename: String,
}

impl Filename {
    pub fn new(directory: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            basename: basename.into(),
        }
    }

    /// Splits on the last `/`. A bare name gets the current directory sentinel.
    pub fn parse(path: &str) -> Self {
        match path.rsplit_once('/') {
            Some((directory, basename)) => Self::new(directory, basename),
            None => Self::new(CURRENT_DIR, path),
        }
    }

    pub fn has_directory(&self) -> bool {
        self.directory != CURRENT_DIR
    }

    pub fn with_basename(&self, basename: impl Into<String>) -> Self {
        Self::new(self.directory.clone(), basename)
    }

    pub fn stem(&self) -> &str {
        match self.basename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.basename,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match self.basename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Renders the path back, dropping the current directory sentinel.
    pub fn to_path_string(&self) -> String {
        if self.has_directory() {
            format!("{}/{}", self.directory, self.basename)
        } else {
            self.basename.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationForm {
    /// NFC
    Composed,
    /// NFD
    Decomposed,
    Unspecified,
}

/// One known double-encoding artifact: `corrupted` is what `correct` looks
/// like after its UTF-8 bytes were read as Windows-1252 and re-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MojibakeRule {
    pub corrupted: String,
    pub correct: String,
}

impl MojibakeRule {
    pub fn new(corrupted: impl Into<String>, correct: impl Into<String>) -> Self {
        Self {
            corrupted: corrupted.into(),
            correct: correct.into(),
        }
    }

    /// Ordering key of the table.
    pub fn sequence_len(&self) -> usize {
        self.corrupted.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryResult {
    /// Holds the old path that was renamed.
    Succeeded(PathBuf),
    NotFound,
}

impl RecoveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RecoveryResult::Succeeded(_))
    }

    pub fn matched_path(&self) -> Option<&PathBuf> {
        match self {
            RecoveryResult::Succeeded(path) => Some(path),
            RecoveryResult::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let name = Filename::parse("uploads/2016/05/Café.jpg");
        assert_eq!(name.directory, "uploads/2016/05");
        assert_eq!(name.basename, "Café.jpg");
        assert_eq!(name.to_path_string(), "uploads/2016/05/Café.jpg");

        let bare = Filename::parse("Café.jpg");
        assert_eq!(bare.directory, CURRENT_DIR);
        assert_eq!(bare.to_path_string(), "Café.jpg");

        let dotted = Filename::parse("./Café.jpg");
        assert_eq!(dotted.to_path_string(), "Café.jpg");

        let rooted = Filename::parse("/Café.jpg");
        assert_eq!(rooted.directory, "");
        assert_eq!(rooted.to_path_string(), "/Café.jpg");

        for path in ["a//b", "uploads///Café.jpg", "//x", "a/./b", "dir/"] {
            assert_eq!(Filename::parse(path).to_path_string(), path);
        }
        assert_eq!(Filename::parse("a//b").directory, "a/");
    }

    #[test]
    fn test_stem_and_extension() {
        let name = Filename::parse("a/photo-150x150.png");
        assert_eq!(name.stem(), "photo-150x150");
        assert_eq!(name.extension(), Some("png"));

        let hidden = Filename::parse(".htaccess");
        assert_eq!(hidden.stem(), ".htaccess");
        assert_eq!(hidden.extension(), None);
    }

    #[test]
    fn test_rule_sequence_len_counts_chars() {
        assert_eq!(MojibakeRule::new("â€”", "—").sequence_len(), 3);
        assert_eq!(MojibakeRule::new("Ã¤", "ä").sequence_len(), 2);
    }

    #[test]
    fn test_recovery_result_serializes() {
        let json = serde_json::to_string(&RecoveryResult::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
        let ok = RecoveryResult::Succeeded(PathBuf::from("a/b.png"));
        assert_eq!(ok.matched_path(), Some(&PathBuf::from("a/b.png")));
        assert!(ok.is_success());
    }
}

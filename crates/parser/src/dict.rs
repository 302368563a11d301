//! Keyword dictionary: surface aliases mapped to canonical Go keywords.
//!
//! The dictionary is built once per run and shared read-only by every
//! phase. Forward entries are last-write-wins so every alias stays valid;
//! reverse entries are first-entry-wins so the first alias declared for a
//! canonical form is the one the formatter prefers.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::DictionaryError;

/// Built-in surface mappings, used when no dictionary file is supplied.
///
/// Order matters: the first entry for a canonical form wins the reverse
/// lookup (`pass` beats `catch` for `<-`).
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("kampung", "package"),
    ("dapao", "import"),
    ("action", "func"),
    ("boss", "main"),
    ("got", "var"),
    ("confirm", "const"),
    ("auto", "iota"),
    ("pattern", "type"),
    ("nasi", "if"),
    ("den", "else"),
    ("tikam", "select"),
    ("see_how", "switch"),
    ("say", "case"),
    ("tompang", "fallthrough"),
    ("anyhow", "default"),
    ("flykite", "goto"),
    ("loop", "for"),
    ("all", "range"),
    ("cabut", "break"),
    ("go", "continue"),
    ("balek", "return"),
    ("nanti", "defer"),
    ("chiong", "go"),
    ("lobang", "chan"),
    ("pass", "<-"),
    ("catch", "<-"),
    ("can", "true"),
    ("cannot", "false"),
    ("kosong", "nil"),
    ("bolehtak", "bool"),
    ("nombor", "int"),
    ("banyak", "int64"),
    ("point", "float64"),
    ("cheem", "complex128"),
    ("tar", "string"),
    ("barang", "struct"),
    ("salah", "error"),
    ("gabra", "panic"),
    ("ki", "*"),
    ("zhi", "rune"),
    ("heng", "recover"),
    ("kaki", "interface"),
    ("menu", "map"),
    ("buat", "make"),
    ("upsize", "append"),
    ("buang", "delete"),
    ("count", "len"),
    ("kwear", "close"),
    ("gong", "fmt.Println"),
    ("somemore", "&&"),
    ("dun", "!"),
    ("or", "||"),
];

/// Bidirectional surface ↔ canonical keyword mapping.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    forward: IndexMap<String, String>,
    reverse: IndexMap<String, String>,
}

impl Dictionary {
    /// The embedded default dictionary, so the tool runs with no external
    /// file.
    pub fn with_defaults() -> Self {
        Self::from_pairs(DEFAULT_MAPPINGS.iter().copied())
    }

    /// Build a dictionary from `(surface, canonical)` pairs in order.
    pub fn from_pairs<S, C, I>(pairs: I) -> Self
    where
        S: Into<String>,
        C: Into<String>,
        I: IntoIterator<Item = (S, C)>,
    {
        let mut dict = Dictionary::default();
        for (surface, canonical) in pairs {
            dict.insert(surface.into(), canonical.into());
        }
        dict
    }

    /// Load a dictionary file: one `surface: canonical` entry per line.
    /// Blank lines and lines starting with `#` or `//` are skipped;
    /// a line without a colon is an error.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dict = Dictionary::default();
        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let (surface, canonical) =
                line.split_once(':')
                    .ok_or_else(|| DictionaryError::InvalidEntry {
                        path: path.to_path_buf(),
                        line: line.to_string(),
                    })?;
            dict.insert(surface.trim().to_string(), canonical.trim().to_string());
        }
        Ok(dict)
    }

    fn insert(&mut self, surface: String, canonical: String) {
        // First entry wins as canonical for the reverse direction.
        if !self.reverse.contains_key(&canonical) {
            self.reverse.insert(canonical.clone(), surface.clone());
        }
        self.forward.insert(surface, canonical);
    }

    /// Canonical Go form for a surface keyword.
    pub fn lookup(&self, surface: &str) -> Option<&str> {
        self.forward.get(surface).map(String::as_str)
    }

    /// Preferred surface alias for a canonical Go keyword.
    pub fn reverse_lookup(&self, canonical: &str) -> Option<&str> {
        self.reverse.get(canonical).map(String::as_str)
    }

    /// Canonical form of `text`, or `text` itself when it is not a known
    /// surface alias.
    pub fn canonical<'a>(&'a self, text: &'a str) -> &'a str {
        self.lookup(text).unwrap_or(text)
    }

    /// All surface keywords, in declaration order.
    pub fn surface_keys(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

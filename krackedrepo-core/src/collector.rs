//! Repository file collection.
//!
//! Depth-first walk over a directory tree with an extension allow-list.
//! Dependency caches and version-control metadata are pruned entirely,
//! and unreadable files are skipped under the default best-effort policy.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::models::FileRecord;
use crate::{Error, Result};

/// Extensions collected when no override is supplied.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "json", "md", "html", "css", "txt",
];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git"];

/// Collection policy and filters.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Allowed file extensions, with or without a leading dot
    pub extensions: Vec<String>,
    /// Directory names pruned from the walk
    pub excluded_dirs: Vec<String>,
    /// Skip files that cannot be read as UTF-8 instead of failing the walk
    pub skip_unreadable: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(ToString::to_string)
                .collect(),
            skip_unreadable: true,
        }
    }
}

impl CollectorConfig {
    fn allows_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    fn excludes_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|dir| dir == name)
    }
}

/// Walk `root` depth-first and return every allow-listed file as a
/// [`FileRecord`], in traversal order.
///
/// File names are recorded relative to `root`. No size cap is applied
/// here; truncation happens later in the prompt builder.
pub fn collect_files(root: &Path, config: &CollectorConfig) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| config.excludes_dir(name)))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if config.skip_unreadable => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
            Err(err) => return Err(Error::Io(err.into())),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        if !config.allows_extension(ext) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if config.skip_unreadable => {
                debug!("skipping unreadable file {}: {err}", path.display());
                continue;
            }
            Err(source) => {
                return Err(Error::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        records.push(FileRecord {
            name,
            content,
            kind: format!(".{ext}"),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn collects_allow_listed_files_with_relative_names() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", b"# readme");
        write(dir.path(), "src/index.ts", b"export {}");
        write(dir.path(), "src/styles.css", b"body {}");
        write(dir.path(), "src/lib.rs", b"fn main() {}"); // not allow-listed
        write(dir.path(), "LICENSE", b"MIT"); // no extension

        let records = collect_files(dir.path(), &CollectorConfig::default()).unwrap();

        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["README.md", "src/index.ts", "src/styles.css"]);
        assert!(records.iter().all(|r| !r.name.is_empty()));
    }

    #[test]
    fn prunes_excluded_directories_entirely() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.js", b"console.log(1)");
        write(dir.path(), "node_modules/pkg/index.js", b"module.exports = {}");
        write(dir.path(), ".git/config.txt", b"[core]");

        let records = collect_files(dir.path(), &CollectorConfig::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "app.js");
    }

    #[test]
    fn records_carry_content_and_extension_tag() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.txt", b"hello world");

        let records = collect_files(dir.path(), &CollectorConfig::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "hello world");
        assert_eq!(records[0].kind, ".txt");
    }

    #[test]
    fn skips_non_utf8_files_under_default_policy() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.md", b"fine");
        write(dir.path(), "bad.txt", &[0xff, 0xfe, 0x00, 0x80]);

        let records = collect_files(dir.path(), &CollectorConfig::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "good.md");
    }

    #[test]
    fn strict_policy_surfaces_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.txt", &[0xff, 0xfe, 0x00, 0x80]);

        let config = CollectorConfig {
            skip_unreadable: false,
            ..CollectorConfig::default()
        };

        let err = collect_files(dir.path(), &config).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn empty_tree_yields_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let records = collect_files(dir.path(), &CollectorConfig::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn extension_matching_accepts_dotted_overrides() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main.rs", b"fn main() {}");

        let mut config = CollectorConfig::default();
        config.extensions.push(".rs".to_string());

        let records = collect_files(dir.path(), &config).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ".rs");
    }
}

//! Input file selection
//!
//! Expands the command-line inputs into the list of files to reindent:
//! explicit files are taken as given, directories contribute files with a
//! known extension (recursively with `--recursive`), and anything matching an
//! exclude glob is dropped.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

/// Depth limit for recursive traversal
const MAX_WALK_DEPTH: usize = 256;

/// Rules deciding which files are picked up
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
    recursive: bool,
}

impl FileSelector {
    /// Build a selector; invalid exclude patterns are ignored with a warning
    #[must_use]
    pub fn new(extensions: &[String], exclude: &[String], recursive: bool) -> Self {
        let exclude = exclude
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    log::warn!("ignoring invalid exclude pattern {p:?}: {e}");
                    None
                }
            })
            .collect();
        let extensions = extensions
            .iter()
            .map(|e| e.strip_prefix('.').unwrap_or(e).to_string())
            .collect();

        Self {
            extensions,
            exclude,
            recursive,
        }
    }

    /// Check if a file has one of the selected extensions
    #[must_use]
    pub fn has_selected_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Check if a path matches any exclusion pattern
    ///
    /// Patterns are tried against the full path, the file name and every
    /// path component.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| {
            pattern.matches(&path_str)
                || path
                    .file_name()
                    .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
                || path.components().any(|component| match component {
                    Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                    _ => false,
                })
        })
    }

    fn accepts_discovered(&self, path: &Path) -> bool {
        path.is_file() && self.has_selected_extension(path) && !self.is_excluded(path)
    }

    /// Collect all files to process, sorted and without duplicates
    #[must_use]
    pub fn collect(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for input in inputs {
            if input.is_file() {
                if !self.is_excluded(input) {
                    files.push(input.clone());
                }
            } else if input.is_dir() {
                if self.recursive {
                    // WalkDir reports symlink loops as errors, which are skipped
                    for entry in WalkDir::new(input)
                        .follow_links(true)
                        .max_depth(MAX_WALK_DEPTH)
                        .into_iter()
                        .filter_map(std::result::Result::ok)
                    {
                        if self.accepts_discovered(entry.path()) {
                            files.push(entry.path().to_path_buf());
                        }
                    }
                } else {
                    match std::fs::read_dir(input) {
                        Ok(entries) => {
                            for entry in entries.filter_map(std::result::Result::ok) {
                                let path = entry.path();
                                if self.accepts_discovered(&path) {
                                    files.push(path);
                                }
                            }
                        }
                        Err(e) => log::warn!("cannot read directory {}: {e}", input.display()),
                    }
                }
            } else {
                log::warn!("skipping {}: no such file or directory", input.display());
            }
        }

        files.sort();
        files.dedup();
        files
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn selector(exclude: &[&str], recursive: bool) -> FileSelector {
        let extensions = vec!["h".to_string(), ".cpp".to_string()];
        let exclude: Vec<String> = exclude.iter().map(ToString::to_string).collect();
        FileSelector::new(&extensions, &exclude, recursive)
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x\n").unwrap();
    }

    #[test]
    fn test_extension_matching() {
        let s = selector(&[], false);
        assert!(s.has_selected_extension(Path::new("src/a.h")));
        assert!(s.has_selected_extension(Path::new("src/a.cpp")));
        assert!(!s.has_selected_extension(Path::new("src/a.c")));
        assert!(!s.has_selected_extension(Path::new("src/Makefile")));
    }

    #[test]
    fn test_exclude_by_file_name_and_component() {
        let s = selector(&["*_gen.cpp", "third_party"], false);
        assert!(s.is_excluded(Path::new("src/parser_gen.cpp")));
        assert!(s.is_excluded(Path::new("src/third_party/zlib.h")));
        assert!(!s.is_excluded(Path::new("src/main.cpp")));
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        let s = selector(&["[unclosed"], false);
        assert!(!s.is_excluded(Path::new("src/main.cpp")));
    }

    #[test]
    fn test_collect_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.cpp"));
        touch(&dir.path().join("b.h"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub").join("c.cpp"));

        let files = selector(&[], false).collect(&[dir.path().to_path_buf()]);

        assert_eq!(
            files,
            vec![dir.path().join("a.cpp"), dir.path().join("b.h")]
        );
    }

    #[test]
    fn test_collect_recursive_with_exclude() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.cpp"));
        touch(&dir.path().join("sub").join("c.cpp"));
        touch(&dir.path().join("vendor").join("d.h"));

        let files = selector(&["vendor"], true).collect(&[dir.path().to_path_buf()]);

        assert_eq!(
            files,
            vec![dir.path().join("a.cpp"), dir.path().join("sub").join("c.cpp")]
        );
    }

    #[test]
    fn test_explicit_file_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.txt");
        touch(&path);

        let files = selector(&[], false).collect(&[path.clone()]);
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_duplicates_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        touch(&path);

        let files = selector(&[], false).collect(&[path.clone(), dir.path().to_path_buf()]);
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_missing_input_skipped() {
        let files = selector(&[], false).collect(&[PathBuf::from("/nonexistent/reindent/x.cpp")]);
        assert!(files.is_empty());
    }
}

//! Markdown source discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// A markdown file found under the source directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePage {
    /// Absolute path of the markdown file.
    pub source_path: PathBuf,
    /// Path relative to the source directory, with `/` separators.
    pub rel_path: String,
    /// URL path relative to the site base (e.g., `""`, `"guide/cicd.html"`, `"queries/"`).
    pub url_path: String,
    /// Output file path relative to the output directory.
    pub output_path: PathBuf,
}

/// Scan `source_dir` recursively for markdown files.
///
/// Hidden files and directories are skipped. Results are sorted by relative
/// path. Returns an empty Vec if the source directory doesn't exist.
pub fn scan_pages(source_dir: &Path) -> Vec<SourcePage> {
    let mut pages = Vec::new();
    if source_dir.exists() {
        scan_directory(source_dir, "", &mut pages);
    }
    pages.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    pages
}

fn scan_directory(dir_path: &Path, rel_prefix: &str, pages: &mut Vec<SourcePage>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let rel_path = if rel_prefix.is_empty() {
            name
        } else {
            format!("{rel_prefix}/{name}")
        };

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel_path, pages);
        } else if path.extension().is_some_and(|e| e == "md") {
            let (url_path, output_path) = output_location(&rel_path);
            pages.push(SourcePage {
                source_path: path,
                rel_path,
                url_path,
                output_path,
            });
        }
    }
}

/// Map a relative markdown path to its URL path and output file.
///
/// - `index.md` -> `""`, `index.html`
/// - `guide/intro.md` -> `"guide/intro.html"`, `guide/intro.html`
/// - `queries/index.md` -> `"queries/"`, `queries/index.html`
pub(crate) fn output_location(rel_path: &str) -> (String, PathBuf) {
    let stem = rel_path.strip_suffix(".md").unwrap_or(rel_path);

    if stem == "index" {
        return (String::new(), PathBuf::from("index.html"));
    }
    if let Some(dir) = stem.strip_suffix("/index") {
        return (format!("{dir}/"), PathBuf::from(format!("{dir}/index.html")));
    }

    let html = format!("{stem}.html");
    (html.clone(), PathBuf::from(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "# Page").unwrap();
    }

    #[test]
    fn test_output_location() {
        assert_eq!(output_location("index.md"), (String::new(), PathBuf::from("index.html")));
        assert_eq!(
            output_location("guide/cicd.md"),
            ("guide/cicd.html".to_owned(), PathBuf::from("guide/cicd.html"))
        );
        assert_eq!(
            output_location("queries/index.md"),
            ("queries/".to_owned(), PathBuf::from("queries/index.html"))
        );
        assert_eq!(
            output_location("queries/windows/index.md"),
            ("queries/windows/".to_owned(), PathBuf::from("queries/windows/index.html"))
        );
    }

    #[test]
    fn test_nested_index_name_not_directory_index() {
        assert_eq!(
            output_location("guide/reindex.md"),
            ("guide/reindex.html".to_owned(), PathBuf::from("guide/reindex.html"))
        );
    }

    #[test]
    fn test_scan_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "index.md");
        touch(temp_dir.path(), "guide/introduction.md");
        touch(temp_dir.path(), "queries/index.md");
        touch(temp_dir.path(), "queries/notes.txt");

        let pages = scan_pages(temp_dir.path());
        let rel: Vec<_> = pages.iter().map(|p| p.rel_path.as_str()).collect();

        assert_eq!(rel, vec!["guide/introduction.md", "index.md", "queries/index.md"]);
        assert_eq!(pages[0].source_path, temp_dir.path().join("guide/introduction.md"));
        assert_eq!(pages[0].url_path, "guide/introduction.html");
        assert_eq!(pages[2].url_path, "queries/");
    }

    #[test]
    fn test_scan_skips_hidden() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), ".vitepress/theme/index.md");
        touch(temp_dir.path(), ".draft.md");
        touch(temp_dir.path(), "guide.md");

        let pages = scan_pages(temp_dir.path());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rel_path, "guide.md");
    }

    #[test]
    fn test_scan_missing_directory() {
        let pages = scan_pages(Path::new("/nonexistent/talon/docs"));
        assert!(pages.is_empty());
    }
}

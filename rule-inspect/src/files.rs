//! Target file discovery.
//!
//! Patterns are resolved against a working directory: an existing file is
//! taken as is, a directory is searched for `.js` files and anything else is
//! treated as a glob over paths relative to the working directory. Entries
//! matched by the default ignores or by `.eslintignore` are left out, even
//! when a pattern names them directly.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

const IGNORE_FILE: &str = ".eslintignore";
const DEFAULT_IGNORES: &[&str] = &["node_modules/", "bower_components/"];
const EXTENSION: &str = "js";

/// Lists the files selected by `patterns`, first match first, without
/// duplicates.
pub fn list_files(patterns: &[String], cwd: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let ignore = IgnoreRules::load(cwd)?;
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let target = cwd.join(pattern);
        let found = if target.is_file() {
            if ignore.is_ignored(relative(&target, cwd)) {
                debug!("File ignored because of a matching ignore pattern: '{pattern}'.");
                Vec::new()
            } else {
                vec![target]
            }
        } else if target.is_dir() {
            walk(&target, cwd, &ignore)
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .collect()
        } else {
            let matcher = glob(pattern)?;
            walk(cwd, cwd, &ignore)
                .filter(|path| matcher.is_match(relative(path, cwd)))
                .collect()
        };

        if found.is_empty() {
            debug!("No files matching '{pattern}' were found.");
        }
        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn glob(pattern: &str) -> anyhow::Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern.trim_start_matches("./"))
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid file pattern: {pattern:?}"))?;
    Ok(glob.compile_matcher())
}

/// Files below `root`, sorted by name, skipping dot entries and ignored paths.
fn walk<'a>(root: &Path, cwd: &'a Path, ignore: &'a IgnoreRules) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| entry.depth() == 0 || !skipped(entry, cwd, ignore))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("skip unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
}

fn skipped(entry: &DirEntry, cwd: &Path, ignore: &IgnoreRules) -> bool {
    let hidden = entry.file_name().to_string_lossy().starts_with('.');
    hidden || ignore.is_ignored(relative(entry.path(), cwd))
}

fn relative<'p>(path: &'p Path, cwd: &Path) -> &'p Path {
    path.strip_prefix(cwd).unwrap_or(path)
}

/// Ignore patterns in `.gitignore` style.
#[derive(Debug)]
pub struct IgnoreRules {
    set: GlobSet,
}

impl IgnoreRules {
    /// Default ignores plus the `.eslintignore` of `cwd`, if any.
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let path = cwd.join(IGNORE_FILE);
        let content = if path.is_file() {
            fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?
        } else {
            String::new()
        };
        Self::parse(DEFAULT_IGNORES.iter().copied().chain(content.lines()))
    }

    /// Builds rules from ignore file lines.
    ///
    /// Blank lines and `#` comments are skipped. Negations are not supported
    /// and are skipped too.
    pub fn parse<'l>(lines: impl IntoIterator<Item = &'l str>) -> anyhow::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('!') {
                warn!("negated ignore pattern '{line}' is not supported");
                continue;
            }

            let trimmed = line.trim_end_matches('/');
            let base = match trimmed.strip_prefix('/') {
                Some(anchored) => anchored.to_string(),
                None if trimmed.contains('/') => trimmed.to_string(),
                None => format!("**/{trimmed}"),
            };
            for pattern in [base.clone(), format!("{base}/**")] {
                let glob = GlobBuilder::new(&pattern)
                    .literal_separator(true)
                    .build()
                    .with_context(|| format!("invalid ignore pattern: {line:?}"))?;
                builder.add(glob);
            }
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Tests a path relative to the working directory.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.set.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "var a;\n").unwrap();
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for rel in [
            "lib/a.js",
            "lib/b.js",
            "lib/readme.md",
            "lib/nested/c.js",
            "lib/.hidden/d.js",
            "lib/node_modules/dep/index.js",
            "lib/generated/e.js",
            "test/a.spec.js",
            "node_modules/eslint/lib/api.js",
        ] {
            touch(dir.path(), rel);
        }
        dir
    }

    #[test]
    fn test_directory_yields_js_files() {
        let dir = project();
        let files = list_files(&["lib".to_string()], dir.path()).unwrap();
        assert_eq!(
            names(&files, dir.path()),
            vec!["lib/a.js", "lib/b.js", "lib/generated/e.js", "lib/nested/c.js"]
        );
    }

    #[test]
    fn test_eslintignore_is_honored() {
        let dir = project();
        fs::write(
            dir.path().join(IGNORE_FILE),
            "# generated code\n\ngenerated/\n!lib/generated/e.js\n",
        )
        .unwrap();

        let files = list_files(&["lib".to_string()], dir.path()).unwrap();
        assert_eq!(
            names(&files, dir.path()),
            vec!["lib/a.js", "lib/b.js", "lib/nested/c.js"]
        );
    }

    #[test]
    fn test_named_file_is_ignored_too() {
        let dir = project();
        fs::write(dir.path().join(IGNORE_FILE), "generated/\n").unwrap();

        let patterns = vec![
            "lib/generated/e.js".to_string(),
            "node_modules/eslint/lib/api.js".to_string(),
            "lib/a.js".to_string(),
        ];
        let files = list_files(&patterns, dir.path()).unwrap();
        assert_eq!(names(&files, dir.path()), vec!["lib/a.js"]);
    }

    #[test]
    fn test_glob_pattern_and_dedup() {
        let dir = project();
        let patterns = vec![
            "lib/a.js".to_string(),
            "**/*.js".to_string(),
            "lib".to_string(),
        ];
        let files = list_files(&patterns, dir.path()).unwrap();
        assert_eq!(
            names(&files, dir.path()),
            vec![
                "lib/a.js",
                "lib/b.js",
                "lib/generated/e.js",
                "lib/nested/c.js",
                "test/a.spec.js",
            ]
        );
    }

    #[test]
    fn test_glob_does_not_cross_directories() {
        let dir = project();
        let files = list_files(&["lib/*.js".to_string()], dir.path()).unwrap();
        assert_eq!(names(&files, dir.path()), vec!["lib/a.js", "lib/b.js"]);
    }

    #[test]
    fn test_unmatched_pattern_is_empty() {
        let dir = project();
        let files = list_files(&["src/**/*.ts".to_string()], dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_ignore_rules() {
        let rules = IgnoreRules::parse(["/build", "logs/", "*.min.js", "vendor/lib"]).unwrap();
        assert!(rules.is_ignored(Path::new("build/app.js")));
        assert!(!rules.is_ignored(Path::new("src/build/app.js")));
        assert!(rules.is_ignored(Path::new("a/logs")));
        assert!(rules.is_ignored(Path::new("a/logs/x.js")));
        assert!(rules.is_ignored(Path::new("src/jquery.min.js")));
        assert!(rules.is_ignored(Path::new("vendor/lib/x.js")));
        assert!(!rules.is_ignored(Path::new("src/vendor/lib/x.js")));
        assert!(!rules.is_ignored(Path::new("src/app.js")));
    }
}

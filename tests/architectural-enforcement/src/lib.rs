//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The catalog core stays headless (no terminal crates)
//! - No blocking HTTP anywhere in the workspace
//! - No `unwrap()`/`expect()` in non-test core code
//!
//! These tests are designed to catch violations early in the development cycle.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A single offending source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the line
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.text)
    }
}

/// Workspace root (two levels above this package)
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// All `.rs` files under `dir`, skipping build output
#[must_use]
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Lines of production code in `source`: everything before the first
/// `#[cfg(test)]`, with comment lines dropped
#[must_use]
pub fn production_lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
        })
        .map(|(i, line)| (i + 1, line))
        .collect()
}

/// Scan production lines of every file under `dir` for any of `needles`
#[must_use]
pub fn find_in_production(dir: &Path, needles: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for path in rust_files(dir) {
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        for (line, text) in production_lines(&source) {
            if needles.iter().any(|needle| text.contains(needle)) {
                violations.push(Violation {
                    path: path.clone(),
                    line,
                    text: text.trim().to_string(),
                });
            }
        }
    }
    violations
}

fn report(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_src() -> PathBuf {
        workspace_root().join("catalog/core/src")
    }

    #[test]
    fn test_scanner_finds_sources() {
        assert!(!rust_files(&core_src()).is_empty());
        assert!(!rust_files(&workspace_root().join("tui/src")).is_empty());
    }

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let source = "fn a() {}\n// x.unwrap()\n#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n";
        let lines = production_lines(source);
        assert_eq!(lines, vec![(1, "fn a() {}")]);
    }

    #[test]
    fn test_core_is_headless() {
        let violations = find_in_production(&core_src(), &["ratatui", "crossterm"]);
        assert!(
            violations.is_empty(),
            "catalog core must not depend on terminal crates:\n{}",
            report(&violations)
        );
    }

    #[test]
    fn test_no_blocking_http() {
        let mut violations = find_in_production(&core_src(), &["reqwest::blocking"]);
        violations.extend(find_in_production(
            &workspace_root().join("tui/src"),
            &["reqwest::blocking"],
        ));
        assert!(
            violations.is_empty(),
            "blocking HTTP found:\n{}",
            report(&violations)
        );
    }

    #[test]
    fn test_no_unwrap_in_core() {
        let violations = find_in_production(&core_src(), &[".unwrap()", ".expect("]);
        assert!(
            violations.is_empty(),
            "unwrap/expect in production core code:\n{}",
            report(&violations)
        );
    }

    #[test]
    fn test_no_thread_sleep_in_tui() {
        let violations =
            find_in_production(&workspace_root().join("tui/src"), &["std::thread::sleep"]);
        assert!(
            violations.is_empty(),
            "blocking sleep in the UI loop:\n{}",
            report(&violations)
        );
    }
}

//! Golden planning scenarios for integration tests.
//!
//! Scenarios live as JSON under `<workspace>/test-fixtures/golden/`. Each test
//! picks the shape it wants to deserialize into; this crate only locates and
//! reads files.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// The first ancestor of the calling crate's manifest directory that holds
/// `test-fixtures/golden`.
fn fixtures_root() -> PathBuf {
    let start = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&start)
        .ancestors()
        .map(|dir| dir.join("test-fixtures"))
        .find(|candidate| candidate.join("golden").is_dir())
        .unwrap_or_else(|| panic!("no test-fixtures/golden above {start}"))
}

/// Read `relative_path` under the fixtures root and deserialize it as `T`.
///
/// # Panics
/// On a missing file or on JSON that does not match `T`; the message names
/// the file.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("{} does not deserialize: {e}", path.display()))
}

/// Whether `relative_path` exists under the fixtures root.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Relative fixture paths (`golden/plans/<name>.json`) for every golden plan scenario.
pub fn golden_plan_scenarios() -> Vec<String> {
    list_fixtures("golden/plans")
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(|n| format!("golden/plans/{n}")))
        .collect()
}

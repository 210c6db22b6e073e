//! Consistency check between translation catalogs and the source tree.
//!
//! Reports keys missing from any catalog, catalog keys no source file
//! translates, and translated keys no catalog defines. Source files are read
//! up to their `#[cfg(test)]` module, so test-only keys are not counted.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const CALL: &str = "translate(\"";
const TEST_MODULE: &str = "#[cfg(test)]";

/// File path -> locale section -> keys.
type Catalogs = BTreeMap<PathBuf, BTreeMap<String, BTreeSet<String>>>;

fn usage() -> String {
    "Usage: cargo run -p hop_i18n_check -- [i18n_dir] [src_dir]\n\
     Defaults: assets/i18n crates"
        .to_string()
}

fn parse_catalogs(i18n_dir: &Path) -> Result<Catalogs, String> {
    let mut files: Vec<PathBuf> = fs::read_dir(i18n_dir)
        .map_err(|e| format!("Failed to read i18n dir '{}': {e}", i18n_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();

    let mut catalogs = Catalogs::new();
    for path in files {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
        let sections: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(&raw)
                .map_err(|e| format!("Failed to parse '{}': {e}", path.display()))?;
        let sections = sections
            .into_iter()
            .map(|(locale, entries)| (locale, entries.into_keys().collect()))
            .collect();
        catalogs.insert(path, sections);
    }
    Ok(catalogs)
}

fn keys_in_text(text: &str) -> Vec<String> {
    let text = match text.find(TEST_MODULE) {
        Some(end) => &text[..end],
        None => text,
    };
    let mut keys = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(CALL) {
        rest = &rest[start + CALL.len()..];
        if let Some(end) = rest.find('"') {
            if end > 0 {
                keys.push(rest[..end].to_string());
            }
            rest = &rest[end..];
        }
    }
    keys
}

fn parse_sources(src_dir: &Path) -> Result<BTreeSet<String>, String> {
    let mut keys = BTreeSet::new();
    let mut pending = vec![src_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .map_err(|e| format!("Failed to read source dir '{}': {e}", dir.display()))?;
        for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                let text = fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
                keys.extend(keys_in_text(&text));
            }
        }
    }
    Ok(keys)
}

fn all_catalog_keys(catalogs: &Catalogs) -> BTreeSet<String> {
    catalogs
        .values()
        .flat_map(|sections| sections.values())
        .flat_map(|keys| keys.iter().cloned())
        .collect()
}

fn compare_catalogs(catalogs: &Catalogs, all_keys: &BTreeSet<String>) -> Vec<String> {
    let mut problems = Vec::new();
    for (path, sections) in catalogs {
        for keys in sections.values() {
            for key in all_keys.difference(keys) {
                problems.push(format!("missing key '{key}' in '{}'", path.display()));
            }
        }
    }
    problems
}

fn compare_usage(catalog_keys: &BTreeSet<String>, source_keys: &BTreeSet<String>) -> Vec<String> {
    let unused = catalog_keys
        .difference(source_keys)
        .map(|key| format!("key '{key}' is not used in source files"));
    let undefined = source_keys
        .difference(catalog_keys)
        .map(|key| format!("key '{key}' is used in source files but not defined in JSON files"));
    unused.chain(undefined).collect()
}

fn check(i18n_dir: &Path, src_dir: &Path) -> Result<Vec<String>, String> {
    let catalogs = parse_catalogs(i18n_dir)?;
    let catalog_keys = all_catalog_keys(&catalogs);
    let source_keys = parse_sources(src_dir)?;

    let mut problems = compare_catalogs(&catalogs, &catalog_keys);
    problems.extend(compare_usage(&catalog_keys, &source_keys));
    Ok(problems)
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 3 {
        return Err(usage());
    }
    let i18n_dir = PathBuf::from(args.get(1).map_or("assets/i18n", String::as_str));
    let src_dir = PathBuf::from(args.get(2).map_or("crates", String::as_str));

    let problems = check(&i18n_dir, &src_dir)?;
    for problem in &problems {
        println!("{problem}");
    }
    if problems.is_empty() {
        println!("success");
        Ok(())
    } else {
        println!("failure");
        std::process::exit(1);
    }
}

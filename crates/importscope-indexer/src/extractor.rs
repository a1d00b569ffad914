//! Import declaration extraction from sanitized source text

use std::collections::BTreeSet;
use std::sync::LazyLock;

use importscope_core::{root_module, is_identifier, ImportOccurrence, ImportStyle};
use regex::Regex;

use crate::sanitize::sanitize;

static PLAIN_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*import[ \t]+(.+)$").expect("valid regex"));

static FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*from[ \t]+(\S+)[ \t]+import\b").expect("valid regex"));

/// Extracts import occurrences from raw file content.
pub trait ImportExtractor: Send + Sync {
    fn extract(&self, source: &str) -> Vec<ImportOccurrence>;
}

/// Python `import` / `from ... import` declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonImportExtractor;

impl ImportExtractor for PythonImportExtractor {
    fn extract(&self, source: &str) -> Vec<ImportOccurrence> {
        extract_occurrences(&sanitize(source))
    }
}

/// Every import target in `sanitized`, in source order.
///
/// Lines are matched against both grammars; keywords are case-sensitive and
/// must be the first token on the line. Relative `from` imports and targets
/// that are not a plain dotted name (optionally aliased) produce nothing.
pub fn extract_occurrences(sanitized: &str) -> Vec<ImportOccurrence> {
    let mut occurrences = Vec::new();

    for (idx, line) in sanitized.lines().enumerate() {
        let line_no = u32::try_from(idx + 1).ok();

        if let Some(caps) = PLAIN_IMPORT.captures(line) {
            for target in caps[1].split(',') {
                if let Some(occurrence) = plain_target(target, line_no) {
                    occurrences.push(occurrence);
                }
            }
        }

        if let Some(caps) = FROM_IMPORT.captures(line) {
            let module = &caps[1];
            if module.starts_with('.') {
                continue;
            }
            if is_dotted_path(module) {
                occurrences.push(ImportOccurrence {
                    root: root_module(module).to_string(),
                    qualified: module.to_string(),
                    line: line_no,
                    style: ImportStyle::From,
                });
            }
        }
    }

    occurrences
}

/// Root modules referenced by `sanitized`, ascending and duplicate-free.
pub fn extract_imports(sanitized: &str) -> BTreeSet<String> {
    extract_occurrences(sanitized)
        .into_iter()
        .map(|o| o.root)
        .collect()
}

fn plain_target(target: &str, line: Option<u32>) -> Option<ImportOccurrence> {
    let tokens: Vec<&str> = target.split_whitespace().collect();
    let module = match tokens.as_slice() {
        [module] => *module,
        [module, "as", alias] if is_identifier(alias) => *module,
        _ => return None,
    };

    is_dotted_path(module).then(|| ImportOccurrence {
        root: root_module(module).to_string(),
        qualified: module.to_string(),
        line,
        style: ImportStyle::Plain,
    })
}

/// `ident(.ident)*`
fn is_dotted_path(module: &str) -> bool {
    module.split('.').all(is_identifier)
}

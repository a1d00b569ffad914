//! Core data structures for per-file import tables

use std::collections::{BTreeSet, HashMap};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Reduce a dotted import path to its root module (`os.path` -> `os`).
pub fn root_module(name: &str) -> &str {
    name.split_once('.').map_or(name, |(root, _)| root)
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// A decoded source file handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Unique key within one scan, usually a root-relative path.
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Which declaration grammar produced an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStyle {
    /// `import a, b.c as d`
    Plain,
    /// `from a.b import c`
    From,
}

/// One import target matched in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOccurrence {
    /// Root module, never dotted.
    pub root: String,
    /// The dotted path as written, alias removed.
    pub qualified: String,
    /// 1-based source line, when known.
    pub line: Option<u32>,
    pub style: ImportStyle,
}

/// Imports found in a single file.
///
/// The root list is always derived from the occurrences, so the table view
/// and the graph view of a file agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileImports {
    pub name: String,
    imports: Vec<String>,
    occurrences: Vec<ImportOccurrence>,
}

impl FileImports {
    pub fn from_occurrences(name: impl Into<String>, occurrences: Vec<ImportOccurrence>) -> Self {
        let imports: BTreeSet<String> = occurrences.iter().map(|o| o.root.clone()).collect();
        FileImports {
            name: name.into(),
            imports: imports.into_iter().collect(),
            occurrences,
        }
    }

    /// Build an entry from already-known module names. Each name is reduced
    /// to its root; names whose root is not an identifier are dropped.
    pub fn from_modules<I, S>(name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let occurrences = modules
            .into_iter()
            .filter_map(|module| {
                let module = module.as_ref().trim();
                let root = root_module(module);
                is_identifier(root).then(|| ImportOccurrence {
                    root: root.to_string(),
                    qualified: module.to_string(),
                    line: None,
                    style: ImportStyle::Plain,
                })
            })
            .collect();
        Self::from_occurrences(name, occurrences)
    }

    /// Ascending, duplicate-free root modules.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Every match in source order; drives edge multiplicity in the graph.
    pub fn occurrences(&self) -> &[ImportOccurrence] {
        &self.occurrences
    }
}

/// Mapping from file name to its sorted root imports.
///
/// Iteration follows insertion order, which is the order files were handed
/// to the scanner.
#[derive(Debug, Clone, Default)]
pub struct FileImportTable {
    files: Vec<FileImports>,
    positions: HashMap<String, usize>,
}

impl FileImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file entry. An entry with the same name is replaced in place.
    pub fn insert(&mut self, file: FileImports) {
        match self.positions.get(&file.name) {
            Some(&pos) => self.files[pos] = file,
            None => {
                self.positions.insert(file.name.clone(), self.files.len());
                self.files.push(file);
            }
        }
    }

    /// Sorted root imports of one file.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.file(name).map(FileImports::imports)
    }

    pub fn file(&self, name: &str) -> Option<&FileImports> {
        self.positions.get(name).map(|&pos| &self.files[pos])
    }

    pub fn files(&self) -> impl Iterator<Item = &FileImports> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Ascending, duplicate-free union of every file's imports.
    pub fn global_imports(&self) -> Vec<String> {
        let all: BTreeSet<&String> = self.files.iter().flat_map(|f| f.imports.iter()).collect();
        all.into_iter().cloned().collect()
    }
}

impl PartialEq for FileImportTable {
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files
    }
}

impl Eq for FileImportTable {}

impl FromIterator<FileImports> for FileImportTable {
    fn from_iter<T: IntoIterator<Item = FileImports>>(iter: T) -> Self {
        let mut table = FileImportTable::new();
        for file in iter {
            table.insert(file);
        }
        table
    }
}

impl Serialize for FileImportTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for file in &self.files {
            map.serialize_entry(&file.name, &file.imports)?;
        }
        map.end()
    }
}

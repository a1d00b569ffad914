//! Multi-file aggregation into a per-file table and a global import set
//!
//! Files are independent, so sanitize + extract (and reading, for
//! [`Aggregator::scan_paths`]) run on a bounded rayon pool. Output order is
//! the input order regardless of which worker finished first.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use importscope_core::{FileImportTable, FileImports, ImportGraph, SourceFile, StdlibCatalogue};
use rayon::prelude::*;
use serde::Serialize;

use crate::discovery::{read_source, source_name};
use crate::error::ScanError;
use crate::events::{ScanEvent, ScanObserver, TracingObserver};
use crate::extractor::{ImportExtractor, PythonImportExtractor};

/// Cooperative cancellation flag, checked before each file.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Output of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub table: FileImportTable,
    /// Ascending, duplicate-free union of all files' imports.
    pub modules: Vec<String>,
    /// Set when the scan stopped early; `table` then holds the longest
    /// prefix of the input that was fully processed.
    pub cancelled: bool,
}

impl ScanResult {
    pub fn empty() -> Self {
        ScanResult {
            table: FileImportTable::new(),
            modules: Vec::new(),
            cancelled: false,
        }
    }

    /// `(stdlib, third_party)`, each ascending.
    pub fn split(&self, catalogue: &StdlibCatalogue) -> (Vec<String>, Vec<String>) {
        catalogue.split(&self.modules)
    }

    pub fn stdlib(&self, catalogue: &StdlibCatalogue) -> Vec<String> {
        self.split(catalogue).0
    }

    pub fn third_party(&self, catalogue: &StdlibCatalogue) -> Vec<String> {
        self.split(catalogue).1
    }

    pub fn graph(&self, catalogue: &StdlibCatalogue) -> ImportGraph {
        ImportGraph::build(&self.table, catalogue)
    }

    pub fn summary(&self, catalogue: &StdlibCatalogue) -> ScanSummary {
        let (stdlib, third_party) = self.split(catalogue);
        ScanSummary {
            files: self.table.clone(),
            modules: self.modules.clone(),
            stdlib,
            third_party,
            cancelled: self.cancelled,
        }
    }
}

/// Serializable view of a [`ScanResult`] with its classification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub files: FileImportTable,
    pub modules: Vec<String>,
    pub stdlib: Vec<String>,
    pub third_party: Vec<String>,
    pub cancelled: bool,
}

enum FileOutcome {
    Scanned(FileImports),
    Skipped,
    NotReached,
}

/// Runs the extractor over a batch of files.
pub struct Aggregator {
    catalogue: &'static StdlibCatalogue,
    extractor: Box<dyn ImportExtractor>,
    observer: Arc<dyn ScanObserver>,
    threads: usize,
    cancel: CancelToken,
}

impl Aggregator {
    /// Python extractor, tracing observer, single thread.
    pub fn new(catalogue: &'static StdlibCatalogue) -> Self {
        Aggregator {
            catalogue,
            extractor: Box::new(PythonImportExtractor),
            observer: Arc::new(TracingObserver),
            threads: 1,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn ImportExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Scan already-decoded files.
    pub fn scan(&self, files: &[SourceFile]) -> ScanResult {
        self.run(files, |file| file.name.clone(), |file| Ok(Cow::Borrowed(file)))
    }

    /// Read and scan root-relative paths. Unreadable, non-UTF-8 and oversized
    /// files are reported as skipped and left out of the table.
    pub fn scan_paths(&self, root: &Path, paths: &[PathBuf], max_file_size: u64) -> ScanResult {
        self.run(
            paths,
            |path| source_name(path),
            |path| read_source(root, path, max_file_size).map(Cow::Owned),
        )
    }

    fn run<T, N, L>(&self, items: &[T], name_of: N, load: L) -> ScanResult
    where
        T: Sync,
        N: Fn(&T) -> String + Sync,
        L: for<'t> Fn(&'t T) -> Result<Cow<'t, SourceFile>, ScanError> + Sync,
    {
        let total = items.len();
        tracing::info!("Scanning {} files with {} worker(s)", total, self.threads);

        let process = |(index, item): (usize, &T)| -> FileOutcome {
            if self.cancel.is_cancelled() {
                return FileOutcome::NotReached;
            }
            let name = name_of(item);
            self.observer.on_event(&ScanEvent::FileStarted {
                index,
                total,
                name: name.clone(),
            });

            match load(item) {
                Ok(file) => {
                    let occurrences = self.extractor.extract(&file.content);
                    tracing::debug!("{}: {} import statements", name, occurrences.len());
                    FileOutcome::Scanned(FileImports::from_occurrences(file.name.clone(), occurrences))
                }
                Err(err) => {
                    self.observer.on_event(&ScanEvent::FileSkipped {
                        name,
                        reason: err.to_string(),
                    });
                    FileOutcome::Skipped
                }
            }
        };

        let outcomes: Vec<FileOutcome> = if self.threads > 1 && total > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
                Ok(pool) => pool.install(|| items.par_iter().enumerate().map(&process).collect()),
                Err(e) => {
                    tracing::warn!("Falling back to sequential scan: {}", e);
                    items.iter().enumerate().map(&process).collect()
                }
            }
        } else {
            items.iter().enumerate().map(&process).collect()
        };

        // Parallel workers may run past the cancellation point; keep only the
        // prefix before the first file that was not reached.
        let mut table = FileImportTable::new();
        let mut cancelled = false;
        for outcome in outcomes {
            match outcome {
                FileOutcome::Scanned(file) => table.insert(file),
                FileOutcome::Skipped => {}
                FileOutcome::NotReached => {
                    cancelled = true;
                    break;
                }
            }
        }

        let modules = table.global_imports();
        for module in &modules {
            self.observer.on_event(&ScanEvent::ModuleClassified {
                name: module.clone(),
                class: self.catalogue.classify(module),
            });
        }
        self.observer.on_event(&ScanEvent::ScanFinished {
            files: table.len(),
            modules: modules.len(),
            cancelled,
        });

        ScanResult {
            table,
            modules,
            cancelled,
        }
    }
}

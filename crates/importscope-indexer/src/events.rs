//! Scan progress events and observers

use std::fmt;
use std::sync::{Mutex, PoisonError};

use importscope_core::ModuleClass;
use tracing::{debug, info, warn};

/// Observable progress of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A file is about to be processed. `index` is 0-based.
    FileStarted { index: usize, total: usize, name: String },
    /// A file could not be read or decoded and was left out.
    FileSkipped { name: String, reason: String },
    /// A module of the global set was classified.
    ModuleClassified { name: String, class: ModuleClass },
    ScanFinished { files: usize, modules: usize, cancelled: bool },
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanEvent::FileStarted { index, total, name } => {
                write!(f, "Processing file {} of {}: {}", index + 1, total, name)
            }
            ScanEvent::FileSkipped { name, reason } => write!(f, "Skipped {}: {}", name, reason),
            ScanEvent::ModuleClassified { name, class } => {
                write!(f, "Module {} classified as {}", name, class)
            }
            ScanEvent::ScanFinished { files, modules, cancelled } => {
                write!(f, "Scanned {} files, {} modules", files, modules)?;
                if *cancelled {
                    f.write_str(" (cancelled)")?;
                }
                Ok(())
            }
        }
    }
}

/// Receives scan progress. Called from worker threads.
pub trait ScanObserver: Send + Sync {
    fn on_event(&self, event: &ScanEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::FileStarted { .. } | ScanEvent::ModuleClassified { .. } => {
                debug!("{}", event)
            }
            ScanEvent::FileSkipped { .. } => warn!("{}", event),
            ScanEvent::ScanFinished { .. } => info!("{}", event),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScanEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScanObserver for RecordingObserver {
    fn on_event(&self, event: &ScanEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_message_is_one_based() {
        let event = ScanEvent::FileStarted {
            index: 0,
            total: 3,
            name: "a.py".to_string(),
        };
        assert_eq!(event.to_string(), "Processing file 1 of 3: a.py");
    }

    #[test]
    fn test_classification_message() {
        let event = ScanEvent::ModuleClassified {
            name: "numpy".to_string(),
            class: ModuleClass::ThirdParty,
        };
        assert_eq!(event.to_string(), "Module numpy classified as thirdParty");
    }

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::new();
        observer.on_event(&ScanEvent::ScanFinished {
            files: 1,
            modules: 2,
            cancelled: true,
        });
        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].to_string(), "Scanned 1 files, 2 modules (cancelled)");
    }
}

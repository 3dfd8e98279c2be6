//! Structured reports of recoverable problems found while the viewer is initialized.
//!
//! Problems that do not stop the viewer (a malformed bounds geometry, a protocol without a layer
//! constructor, an unknown control name) are not returned as errors. Instead they are sent to a
//! [`DiagnosticsSink`] as [`Diagnostic`] values, and mirrored to the `log` facade.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::Mutex;

use crate::error::{UnsupportedReason, ViewerError};

/// Severity of a diagnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Something was skipped, but the viewer works as configured otherwise.
    Warning,
    /// Part of the configuration cannot be honored.
    Error,
}

/// Machine readable kind of a diagnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Bounds geometry was malformed, default bounds were used.
    GeometryParse,
    /// No overlay layer could be produced for the protocol.
    UnsupportedProtocol,
    /// A configured control name is not registered.
    UnrecognizedControl,
    /// The overlay layer constructor failed.
    OverlayFailed,
    /// The viewer was asked to load its overlay a second time.
    AlreadyLoaded,
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::GeometryParse => "geometry-parse",
            Self::UnsupportedProtocol => "unsupported-protocol",
            Self::UnrecognizedControl => "unrecognized-control",
            Self::OverlayFailed => "overlay-failed",
            Self::AlreadyLoaded => "already-loaded",
        };
        write!(f, "{code}")
    }
}

/// Single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the event.
    pub severity: Severity,
    /// Kind of the event.
    pub code: DiagnosticCode,
    /// Human readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
        }
    }

    /// Converts a recoverable error into a diagnostic.
    pub fn from_error(error: &ViewerError) -> Self {
        let (severity, code) = match error {
            ViewerError::GeometryParse(_) => (Severity::Warning, DiagnosticCode::GeometryParse),
            ViewerError::UnsupportedProtocol {
                reason: UnsupportedReason::NotYetImplemented,
                ..
            } => (Severity::Warning, DiagnosticCode::UnsupportedProtocol),
            ViewerError::UnsupportedProtocol { .. } => {
                (Severity::Error, DiagnosticCode::UnsupportedProtocol)
            }
            ViewerError::UnrecognizedControl(_) => {
                (Severity::Error, DiagnosticCode::UnrecognizedControl)
            }
            _ => (Severity::Error, DiagnosticCode::OverlayFailed),
        };

        Self::new(severity, code, error.to_string())
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticsSink: MaybeSend + MaybeSync {
    /// Accepts a diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

impl<T: Fn(Diagnostic) + MaybeSend + MaybeSync> DiagnosticsSink for T {
    fn report(&self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// In-memory diagnostics collector. Clones share the same storage, so a clone can be given to the
/// viewer while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all diagnostics reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Number of diagnostics with the given code.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.code == code)
            .count()
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

/// Writes the diagnostic to the log and passes it to the sink.
pub(crate) fn emit(sink: &dyn DiagnosticsSink, diagnostic: Diagnostic) {
    match diagnostic.severity {
        Severity::Info => log::info!("{diagnostic}"),
        Severity::Warning => log::warn!("{diagnostic}"),
        Severity::Error => log::error!("{diagnostic}"),
    }

    sink.report(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_clones_share_entries() {
        let log = DiagnosticLog::new();
        let sink: Box<dyn DiagnosticsSink> = Box::new(log.clone());

        emit(
            &*sink,
            Diagnostic::new(Severity::Info, DiagnosticCode::AlreadyLoaded, "again"),
        );

        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.count(DiagnosticCode::AlreadyLoaded), 1);
        assert_eq!(log.count(DiagnosticCode::GeometryParse), 0);
    }

    #[test]
    fn severity_of_unsupported_protocol_depends_on_reason() {
        let deferred = Diagnostic::from_error(&ViewerError::UnsupportedProtocol {
            protocol: "IndexMap".into(),
            reason: UnsupportedReason::NotYetImplemented,
        });
        let unknown = Diagnostic::from_error(&ViewerError::UnsupportedProtocol {
            protocol: "Carrier pigeon".into(),
            reason: UnsupportedReason::Unrecognized,
        });

        assert_eq!(deferred.severity, Severity::Warning);
        assert_eq!(unknown.severity, Severity::Error);
        assert_eq!(deferred.code, unknown.code);
        assert_eq!(
            unknown.to_string(),
            "[unsupported-protocol] unsupported protocol name \"Carrier pigeon\": unrecognized protocol"
        );
    }

    #[test]
    fn closures_are_sinks() {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let target = collected.clone();
        let sink = move |d: Diagnostic| target.lock().push(d.code);

        sink.report(Diagnostic::new(
            Severity::Error,
            DiagnosticCode::UnrecognizedControl,
            "Zoom",
        ));

        assert_eq!(*collected.lock(), vec![DiagnosticCode::UnrecognizedControl]);
    }
}

//! Accumulator for diagnostics reported across rules and files.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Running totals kept next to the collected diagnostics.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SinkTotals {
    /// Error-severity diagnostics.
    pub errors: usize,
    /// Warning-severity diagnostics.
    pub warnings: usize,
    /// Diagnostics carrying a fix.
    pub fixable: usize,
}

#[derive(Default)]
struct Inner {
    diagnostics: Vec<Diagnostic>,
    totals: SinkTotals,
}

/// Host-side collector for the diagnostics of a lint run.
///
/// Rules never see the sink; the engine hands each finished session's
/// diagnostics over in emission order. Methods take `&self` so one sink can
/// be shared by a host linting files on several threads. Totals survive
/// [`take_all`](Self::take_all), so a host can drain per file and still ask
/// whether the whole run failed.
#[derive(Default)]
pub struct DiagnosticSink {
    inner: Mutex<Inner>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one diagnostic and updates the totals.
    pub fn emit(&self, diag: Diagnostic) {
        let mut inner = self.lock();
        match diag.severity {
            Severity::Error => inner.totals.errors += 1,
            Severity::Warning => inner.totals.warnings += 1,
            Severity::Note | Severity::Help => {}
        }
        if diag.fix.is_some() {
            inner.totals.fixable += 1;
        }
        inner.diagnostics.push(diag);
    }

    /// Emits every diagnostic from `diags`, keeping their order.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.emit(diag);
        }
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        self.lock().diagnostics.len()
    }

    /// `true` when no diagnostics are held.
    pub fn is_empty(&self) -> bool {
        self.lock().diagnostics.is_empty()
    }

    /// Totals over everything ever emitted into this sink.
    pub fn totals(&self) -> SinkTotals {
        self.lock().totals
    }

    /// `true` once any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.totals().errors > 0
    }

    /// Error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.totals().errors
    }

    /// Warning-severity diagnostics emitted so far.
    pub fn warning_count(&self) -> usize {
        self.totals().warnings
    }

    /// Counts held diagnostics reported by `rule` (name or code).
    pub fn count_for(&self, rule: &str) -> usize {
        self.lock()
            .diagnostics
            .iter()
            .filter(|d| d.rule == rule || d.code.to_string() == rule)
            .count()
    }

    /// Drains the held diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.lock().diagnostics)
    }

    /// Drains the held diagnostics ordered by file, then source position.
    /// Diagnostics at the same position keep their emission order.
    pub fn take_sorted(&self) -> Vec<Diagnostic> {
        let mut diags = self.take_all();
        diags.sort_by_key(|d| {
            let span = d.primary_span;
            (span.file.as_raw(), span.start, span.end)
        });
        diags
    }

    /// Snapshot of the held diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().diagnostics.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking emitter cannot leave the vector half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use emberscript_lexer::{tokenize, LanguageDefinition};
use tracing::{debug, trace};

use crate::{
    compiler::SyntaxCompiler,
    document::{Document, DocumentKind},
    marker::{aggregate, MarkerSet},
    sink::MarkerSink,
};

/// How long the editor stays quiet after the last keystroke before the
/// document is re-checked.
pub const QUIET_WINDOW: Duration = Duration::from_millis(1200);

/// Debounced syntax checking for the active document.
///
/// The timers here are cooperative: [`text_changed`](Self::text_changed)
/// arms a deadline and the host's frame loop drives [`poll`](Self::poll) to
/// fire the due ones. Deadlines are never cancelled; a superseded one still
/// fires, observes a nonzero pending count, and discards itself without
/// doing any work. Only the deadline armed by the last edit before a full
/// quiet window actually lexes and compiles.
#[derive(Debug)]
pub struct DiagnosticScheduler {
    quiet_window: Duration,
    pending_requests: u32,
    deadlines: VecDeque<Instant>,
    markers: MarkerSet,
}

impl DiagnosticScheduler {
    pub fn new() -> Self {
        Self::with_quiet_window(QUIET_WINDOW)
    }

    pub fn with_quiet_window(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            pending_requests: 0,
            deadlines: VecDeque::new(),
            markers: MarkerSet::new(),
        }
    }

    /// Markers from the most recently completed, non-superseded check of the
    /// active document.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Notifies the scheduler that the active document's text changed.
    ///
    /// Clears markers immediately - stale highlights must never persist
    /// against edited text - and arms a fresh quiet-window deadline.
    pub fn text_changed(&mut self, now: Instant, sink: &mut dyn MarkerSink) {
        self.markers.clear();
        sink.publish(&self.markers);
        self.pending_requests += 1;
        self.deadlines.push_back(now + self.quiet_window);
        trace!(
            pending_requests = self.pending_requests,
            "armed delayed syntax check"
        );
    }

    /// Notifies the scheduler that the active document was closed or
    /// switched away from. Every armed deadline becomes a no-op and the
    /// presentation layer is told to clear.
    pub fn document_closed(&mut self, sink: &mut dyn MarkerSink) {
        self.pending_requests = 0;
        self.deadlines.clear();
        self.markers.clear();
        sink.publish(&self.markers);
    }

    /// Fires every deadline that is due at `now`, in arrival order, and runs
    /// the syntax check for the last one standing. Returns how many checks
    /// actually ran; under normal editing that is 0 or 1.
    pub fn poll(
        &mut self,
        now: Instant,
        document: Option<&Document>,
        lang: &LanguageDefinition,
        compiler: &mut dyn SyntaxCompiler,
        sink: &mut dyn MarkerSink,
    ) -> usize {
        let mut checks_run = 0;
        while self.deadlines.front().is_some_and(|&deadline| deadline <= now) {
            self.deadlines.pop_front();
            self.pending_requests = self.pending_requests.saturating_sub(1);
            if self.pending_requests > 0 {
                trace!(
                    pending_requests = self.pending_requests,
                    "superseded syntax check discarded"
                );
                continue;
            }

            let Some(document) = document else {
                trace!("no active document, skipping syntax check");
                continue;
            };
            if document.kind != DocumentKind::Script {
                trace!("active document is not a script, skipping syntax check");
                continue;
            }

            let tokens = tokenize(&document.text, lang);
            let errors = compiler.check(&tokens);
            self.markers = aggregate(errors);
            // An empty set is published too: it is an explicit clear, not a
            // no-op.
            sink.publish(&self.markers);
            debug!(
                tokens = tokens.len(),
                markers = self.markers.len(),
                "syntax check complete"
            );
            checks_run += 1;
        }
        checks_run
    }
}

impl Default for DiagnosticScheduler {
    fn default() -> Self {
        Self::new()
    }
}

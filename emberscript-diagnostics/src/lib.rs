//! Live-editing diagnostics for Emberscript documents: debounced re-checking
//! of the active document and aggregation of compiler errors into per-line
//! editor markers.

pub mod compiler;
pub mod document;
pub mod marker;
pub mod scheduler;
pub mod sink;

pub use compiler::SyntaxCompiler;
pub use document::{Document, DocumentError, DocumentKind};
pub use marker::{aggregate, DiagnosticMarker, MarkerSet, MarkerSpan, ParserError};
pub use scheduler::{DiagnosticScheduler, QUIET_WINDOW};
pub use sink::MarkerSink;

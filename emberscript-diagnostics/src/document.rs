use thiserror::Error;

/// File extension of Emberscript sources.
pub const SCRIPT_EXTENSION: &str = "ember";

/// What the editor has open in the active tab. Only script documents
/// participate in live syntax checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Script,
    Other,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case(SCRIPT_EXTENSION) {
            Self::Script
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("`{0}` is not an Emberscript source file (expected a `.{SCRIPT_EXTENSION}` extension)")]
    UnsupportedExtension(String),
}

/// The active document as the diagnostics pipeline sees it: the full current
/// text plus enough type information to know whether checking applies.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(text: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn script(text: impl Into<String>) -> Self {
        Self::new(text, DocumentKind::Script)
    }
}

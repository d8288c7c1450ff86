use std::collections::HashSet;

/// The keyword and type catalogue the lexer classifies identifier-like text
/// against.
///
/// Read-only during a scan. The compiler supplies a fresh definition whenever
/// the open project's type catalogue changes (for example after a schema
/// edit); the lexer keeps no state between calls, so nothing needs to be
/// invalidated.
#[derive(Debug, Clone, Default)]
pub struct LanguageDefinition {
    pub keywords: HashSet<String>,
    pub primitive_type_names: Vec<String>,
}

impl LanguageDefinition {
    pub fn new(
        keywords: impl IntoIterator<Item = impl Into<String>>,
        primitive_type_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            primitive_type_names: primitive_type_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.keywords.contains(text)
    }

    pub fn is_primitive_type(&self, text: &str) -> bool {
        self.primitive_type_names.iter().any(|name| name == text)
    }
}

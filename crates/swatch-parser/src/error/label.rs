//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the style file.
///
/// A diagnostic normally has one primary label marking the offending text.
/// Secondary labels point at related lines, such as the earlier assignment
/// a duplicate key overrides:
///
/// ```text
/// warning: `title.font` is assigned more than once
///   --> theme.style:9:5
///    |
///  4 |     font = FONT(Avenir-Book, 18)
///    |     ---------------------------- previous value
///  9 |     font = FONT(Avenir-Heavy, 18)
///    |     ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ this value wins
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "unknown literal");

        assert_eq!(label.span().range(), 10..20);
        assert_eq!(label.message(), "unknown literal");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "previous value");

        assert_eq!(label.span().range(), 5..15);
        assert!(label.is_secondary());
    }
}

//! String utility functions shared by the scanner and the rewriter.

/// Heuristic check for whether a position falls inside a string literal.
///
/// Counts unescaped single and double quotes in the text preceding a
/// candidate comment marker; an odd count of either kind means the marker
/// sits inside an open string and should not be treated as a comment.
///
/// This is deliberately not a tokenizer: it has no awareness of escape
/// sequences beyond `\'`/`\"`, raw strings, or triple-quoted strings, and
/// can both under- and over-suppress on pathological lines. The simple
/// parity count is part of the tool's documented behavior; tests pin it
/// down in both directions.
///
/// # Example
///
/// ```
/// use shears::string_utils::inside_string_literal;
///
/// assert!(inside_string_literal("url = \"http://example"));
/// assert!(!inside_string_literal("x = \"a\" "));
/// ```
pub fn inside_string_literal(text: &str) -> bool {
    let single_quotes = text.matches('\'').count() - text.matches("\\'").count();
    let double_quotes = text.matches('"').count() - text.matches("\\\"").count();

    single_quotes % 2 == 1 || double_quotes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_quotes_are_outside() {
        assert!(!inside_string_literal("x = 5 "));
        assert!(!inside_string_literal("name = \"value\" "));
        assert!(!inside_string_literal("pair = 'a' + 'b' "));
    }

    #[test]
    fn test_open_quote_is_inside() {
        assert!(inside_string_literal("url = \"http://example.com"));
        assert!(inside_string_literal("s = 'it"));
    }

    #[test]
    fn test_escaped_quotes_do_not_count() {
        // One real quote plus one escaped quote: still inside
        assert!(inside_string_literal("s = \"she said \\\""));
        // Two real quotes, one escaped in between: balanced
        assert!(!inside_string_literal("s = \"she said \\\" done\" "));
    }

    #[test]
    fn test_apostrophe_over_suppresses() {
        // A lone apostrophe in prose reads as an open string; this is the
        // documented limitation of the parity count.
        assert!(inside_string_literal("count = items.len() + owner's "));
    }
}

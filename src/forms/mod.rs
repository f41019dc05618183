pub mod categories;
pub mod products;
pub mod tags;

/// Trims the input and collapses inner whitespace runs into single spaces,
/// dropping control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_whitespace_and_strips_controls() {
        assert_eq!(sanitize_inline_text("  Winter\t Sale \u{7} "), "Winter Sale");
        assert_eq!(sanitize_inline_text("   "), "");
    }
}

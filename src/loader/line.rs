//! Character-set classification of raw lines.

use crate::constants::NUMERIC_CHARS;

/// Check whether every character of `line` could belong to numeric data.
///
/// Only separates data lines from header and noise lines; it does not check
/// that the characters form well-formed numbers. A blank line passes.
pub fn is_number_line(line: &str, delimiter: &str) -> bool {
    line.chars()
        .all(|c| c.is_whitespace() || NUMERIC_CHARS.contains(c) || delimiter.contains(c))
}

/// Check whether a line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_lines() {
        assert!(is_number_line("1 2.5 -3e-4", ","));
        assert!(is_number_line("1,2.5,+3E+4", ","));
        assert!(is_number_line("  1 ;  .5 ", ";"));
        assert!(is_number_line("", ","));
    }

    #[test]
    fn test_header_and_noise_lines() {
        assert!(!is_number_line("step fx fy", ","));
        assert!(!is_number_line("# 1 2 3", ","));
        assert!(!is_number_line("1;2;3", ","));
        assert!(!is_number_line("nan 1 2", ","));
    }

    #[test]
    fn test_blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank(" 1 "));
    }
}

//! Stdin picker: numbered list on stderr, 1-based choice read from stdin.

use schext_core::extract::Picker;
use std::io::{self, BufRead, Write};

pub struct StdinPicker;

impl Picker for StdinPicker {
    fn pick(&self, title: &str, items: &[String]) -> Option<usize> {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}:", title);
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(err, "  {:>3}) {}", i + 1, item);
        }
        let _ = write!(err, "Enter a number (empty to cancel): ");
        let _ = err.flush();

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        parse_choice(&line, items.len())
    }
}

/// Parses a 1-based choice; `None` for empty, non-numeric or out-of-range input.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_valid() {
        assert_eq!(parse_choice("1\n", 3), Some(0));
        assert_eq!(parse_choice("  3 ", 3), Some(2));
    }

    #[test]
    fn parse_choice_rejects() {
        assert_eq!(parse_choice("\n", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}

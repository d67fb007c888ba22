//! Line-range snippet extraction.
//!
//! Review comments anchor to a 1-based inclusive line range. Extraction
//! clamps the range to the file before slicing, so hostile or stale ranges
//! (beyond EOF, zero, negative, inverted) can never index out of bounds.

/// A snippet cut from file content, with its clamped 0-based range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// The extracted lines, joined with `\n`.
    pub text: String,

    /// Inclusive lower bound (0-based) after clamping.
    pub lower: usize,

    /// Exclusive upper bound after clamping. Always `>= lower` and
    /// `<= total_lines`.
    pub upper: usize,
}

/// Clamps a 1-based inclusive line range to `[0, total_lines]` half-open.
///
/// `lower = max(0, start_line - 1)`, `upper = min(total_lines, end_line)`,
/// and `upper` is raised to `lower` when the input range is inverted, so the
/// result is always a valid (possibly empty) slice range.
pub fn clamp_range(start_line: i64, end_line: i64, total_lines: usize) -> (usize, usize) {
    let total = total_lines as i64;
    let lower = start_line.saturating_sub(1).clamp(0, total) as usize;
    let upper = end_line.clamp(0, total) as usize;

    (lower, upper.max(lower))
}

/// Extracts the commented line range from file content.
///
/// Lines are split on `\n`, matching how the range was computed against the
/// file in the diff; a trailing newline contributes a final empty line.
pub fn extract_snippet(content: &str, start_line: i64, end_line: i64) -> Snippet {
    let lines: Vec<&str> = content.split('\n').collect();
    let (lower, upper) = clamp_range(start_line, end_line, lines.len());

    Snippet {
        text: lines[lower..upper].join("\n"),
        lower,
        upper,
    }
}

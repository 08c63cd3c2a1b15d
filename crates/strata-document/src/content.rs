//! Content accumulation between headings.

use std::mem;

use crate::Section;

/// Lines gathered since the last heading, waiting to be attached to a section.
///
/// Leading blank lines are never buffered and trailing blank lines are dropped on
/// [`take`](Self::take), so attached content is blank-trimmed at both ends while internal
/// blank lines survive as empty strings.
#[derive(Debug, Default)]
pub struct ContentBuffer {
    /// Pending lines in source order.
    lines: Vec<String>,
    /// 1-based source line of the first buffered line.
    first_line: Option<usize>,
}

impl ContentBuffer {
    /// Appends a line. `line_no` is its 1-based position in the source text.
    pub fn push(&mut self, line: String, line_no: usize) {
        if line.is_empty() && self.lines.is_empty() {
            return;
        }
        self.first_line.get_or_insert(line_no);
        self.lines.push(line);
    }

    /// True when no non-blank line is pending.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 1-based source line of the first pending line.
    pub fn first_line(&self) -> Option<usize> {
        self.first_line
    }

    /// Drains the buffer, returning its lines with trailing blanks removed.
    pub fn take(&mut self) -> Vec<String> {
        self.first_line = None;
        let mut lines = mem::take(&mut self.lines);
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }
}

/// Attaches buffered lines to a section, preserving their order.
///
/// Blank lines at either end are trimmed; an empty residue leaves the section untouched.
pub fn attach(buffer: Vec<String>, target: &mut Section) {
    let start = buffer.iter().position(|l| !l.is_empty());
    let end = buffer.iter().rposition(|l| !l.is_empty());
    if let (Some(start), Some(end)) = (start, end) {
        target.content.extend(buffer.into_iter().take(end + 1).skip(start));
    }
}

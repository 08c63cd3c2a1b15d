//! Markdown-specific line analysis.

use std::collections::HashSet;

use pulldown_cmark::{Event, Parser, Tag};

/// Returns the 0-based indexes of lines that lie inside fenced or indented code blocks.
///
/// Fence lines themselves are included. Line indexes follow [`str::lines`].
pub fn code_block_lines(content: &str) -> HashSet<usize> {
    let line_starts = line_starts(content);
    let mut lines = HashSet::new();

    for (event, range) in Parser::new(content).into_offset_iter() {
        if let Event::Start(Tag::CodeBlock(_)) = event {
            let first = line_index(&line_starts, range.start);
            // The range end is exclusive and usually sits just past the closing newline
            let last = line_index(&line_starts, range.end.saturating_sub(1).max(range.start));
            lines.extend(first..=last);
        }
    }

    lines
}

/// Byte offset where each line starts.
fn line_starts(content: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        starts.push(offset);
        offset += line.len();
    }
    starts
}

/// Index of the line containing `offset`.
fn line_index(starts: &[usize], offset: usize) -> usize {
    match starts.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: HashSet<usize>) -> Vec<usize> {
        let mut v: Vec<_> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_fenced_block_lines() {
        let content = "# Title\n\n```sh\n# not a heading\necho hi\n```\n\nAfter";
        assert_eq!(sorted(code_block_lines(content)), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let content = "Intro\n\n```\n# comment\nmore";
        assert_eq!(sorted(code_block_lines(content)), vec![2, 3, 4]);
    }

    #[test]
    fn test_indented_block() {
        let content = "Para\n\n    # indented code\n    more code\n\nText";
        let lines = code_block_lines(content);
        assert!(lines.contains(&2));
        assert!(lines.contains(&3));
        assert!(!lines.contains(&0));
        assert!(!lines.contains(&5));
    }

    #[test]
    fn test_no_code() {
        assert!(code_block_lines("# A\n\ntext\n").is_empty());
        assert!(code_block_lines("").is_empty());
    }
}

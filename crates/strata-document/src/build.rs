//! Hierarchy construction from a flat line stream.
//!
//! The builder folds classified lines into a section forest with an explicit stack of open
//! sections, outermost at the bottom. A heading of level `L` closes every open section whose
//! level is `>= L`, so equal levels become siblings and deeper levels become children.
//! Closed sections are moved into their parent's `children` (or the root list) as they are
//! popped, which keeps document order without back-references.

use std::collections::HashSet;

use strata_config::{NumberedHeadings, StructureSettings};
use tracing::trace;

use crate::{
    DocumentError, Section, SectionId,
    classify::{HeadingClassifier, HeadingForm, HeadingMatch},
    content::{ContentBuffer, attach},
    markdown::code_block_lines,
};

/// Origin label used for in-memory text in errors.
pub const TEXT_ORIGIN: &str = "<text>";

/// Stateful fold from lines to a section forest.
///
/// A builder holds no state beyond one conversion; create a fresh one per document.
pub struct HierarchyBuilder<'a> {
    /// Heading rules.
    classifier: &'a HeadingClassifier,
    /// Open sections, outermost first.
    stack: Vec<Section>,
    /// Closed root-level sections.
    roots: Vec<Section>,
    /// Content since the last heading.
    buffer: ContentBuffer,
    /// Next id number.
    next_id: usize,
    /// 0-based indexes of lines inside code blocks.
    code_lines: HashSet<usize>,
    /// Whether a markup heading has been seen.
    seen_markup: bool,
    /// Whether the most recently opened section came from a numbered heading.
    in_numbered: bool,
    /// Lines consumed so far.
    line_count: usize,
}

impl<'a> HierarchyBuilder<'a> {
    /// Creates a builder using the given classifier.
    pub fn new(classifier: &'a HeadingClassifier) -> Self {
        Self {
            classifier,
            stack: Vec::new(),
            roots: Vec::new(),
            buffer: ContentBuffer::default(),
            next_id: 0,
            code_lines: HashSet::new(),
            seen_markup: false,
            in_numbered: false,
            line_count: 0,
        }
    }

    /// Marks lines (0-based) that must be treated as verbatim code.
    pub fn with_code_lines(mut self, code_lines: HashSet<usize>) -> Self {
        self.code_lines = code_lines;
        self
    }

    /// Consumes the next source line.
    pub fn push_line(&mut self, raw: &str) {
        let index = self.line_count;
        self.line_count += 1;
        let line_no = index + 1;

        if self.code_lines.contains(&index) {
            self.buffer.push(raw.trim_end().to_string(), line_no);
            return;
        }

        let line = raw.trim();
        match self.classifier.classify(line) {
            Some(heading) if self.accepts(&heading) => self.open(heading, line_no),
            _ => self.buffer.push(line.to_string(), line_no),
        }
    }

    /// Flushes pending content, closes every open section and returns the roots.
    pub fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.close_while(|_| true);
        self.roots
    }

    /// Applies the builder-state part of the numbered heading policy.
    ///
    /// Under `Leading`, pending content only blocks a numbered heading when it belongs to
    /// the preamble or to a section some other heading opened.
    fn accepts(&self, heading: &HeadingMatch) -> bool {
        match (heading.form, self.classifier.numbered_policy()) {
            (HeadingForm::Numbered, NumberedHeadings::Leading) => {
                !self.seen_markup && (self.buffer.is_empty() || self.in_numbered)
            }
            _ => true,
        }
    }

    /// Opens a section for an accepted heading.
    fn open(&mut self, heading: HeadingMatch, line_no: usize) {
        self.flush();
        self.close_while(|open| open.level >= heading.level);

        if heading.form == HeadingForm::Markup {
            self.seen_markup = true;
        }
        self.in_numbered = heading.form == HeadingForm::Numbered;

        let id = self.allocate_id();
        trace!(%id, level = heading.level, title = %heading.title, "open section");
        self.stack
            .push(Section::heading(id, heading.level, heading.title, line_no));
    }

    /// Attaches pending content to the top of the stack, or to a new preamble.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let first_line = self.buffer.first_line().unwrap_or(1);
        let lines = self.buffer.take();

        if let Some(top) = self.stack.last_mut() {
            attach(lines, top);
        } else {
            let mut preamble = Section::preamble(self.allocate_id(), first_line);
            attach(lines, &mut preamble);
            self.roots.push(preamble);
        }
    }

    /// Pops open sections while `should_close` holds, attaching each to its parent.
    fn close_while(&mut self, should_close: impl Fn(&Section) -> bool) {
        while self.stack.last().is_some_and(&should_close) {
            let Some(closed) = self.stack.pop() else {
                break;
            };
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(closed),
                None => self.roots.push(closed),
            }
        }
    }

    /// Hands out the next sequential id.
    fn allocate_id(&mut self) -> SectionId {
        let id = SectionId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Builds a section forest from lines. Never fails; arbitrary text yields some tree.
pub fn build<'l>(
    lines: impl IntoIterator<Item = &'l str>,
    classifier: &HeadingClassifier,
) -> Vec<Section> {
    let mut builder = HierarchyBuilder::new(classifier);
    for line in lines {
        builder.push_line(line);
    }
    builder.finish()
}

/// Structures a complete text.
///
/// Returns [`DocumentError::NoContent`] for empty or whitespace-only input. When
/// `markdown` is set, lines inside code blocks are kept verbatim and never open sections.
pub fn structure(
    text: &str,
    settings: &StructureSettings,
    markdown: bool,
    origin: &str,
) -> Result<Vec<Section>, DocumentError> {
    if text.trim().is_empty() {
        return Err(DocumentError::NoContent {
            origin: origin.to_string(),
        });
    }

    let classifier = HeadingClassifier::new(settings);
    let mut builder = HierarchyBuilder::new(&classifier);
    if markdown {
        builder = builder.with_code_lines(code_block_lines(text));
    }
    for line in text.lines() {
        builder.push_line(line);
    }
    Ok(builder.finish())
}

//! strata: document structuring for knowledge bases.
//!
//! strata turns PDF, Markdown, plain-text, DOCX and HTML documents into a tree of sections,
//! annotates the tree with keywords, best practices and examples, and writes the result as
//! YAML, JSON or TOON. The library crates do the work; this crate wires them into the
//! `strata` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod logging;
pub mod pipeline;

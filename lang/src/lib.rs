//! An incremental syntax colouriser and fold-structure analyser for the Dart language.
//!
//! Dartlex gives a text editor the two passes it needs to render and collapse Dart
//! source: a [colouriser](lexer::colourise()) that classifies every byte of a buffer
//! into a small set of lexical styles, and a [folder](lexer::fold()) that assigns each
//! line a fold level and header flag. Both passes restart from arbitrary line boundaries using
//! only a compact per-line state the host stores between invocations, so an editor can
//! re-lex the small window around an edit instead of the whole document. The lexer is
//! total and tolerant of erroneous or incomplete input; malformed constructs degrade to
//! plausible styling rather than errors.
//!
//! The host side of the contract is the [document::Styler] trait. The crate ships an
//! in-memory [document::TextDocument] host used by the tests and the `dlx` command-line
//! front end.
//!

#[macro_use]
extern crate static_assertions;

pub mod document;
pub mod lexer;
pub mod source;
pub mod word_list;

//! The two lexing passes and their registration with a host editor.
//!
//! The [colourise()] pass styles every byte of a range; the [fold()] pass derives
//! per-line fold levels from the result. Both restart from any line boundary given the style
//! byte before the restart point and the per-line states stored by the host, which is
//! what lets an editor re-lex only the window around an edit. Dart makes the restart
//! the interesting part: triple-quoted strings span lines, block comments nest, and a
//! `${...}` interpolation may contain arbitrary expressions including further strings.
//! The nested-comment depth travels in the per-line state; the interpolation stack is
//! rebuilt by backtracking to the line where interpolation begins.
//!
//! Hosts discover the passes through [DART_LEXER], a descriptor naming the lexer, its
//! language tag, and the four keyword lists it consults.

pub mod fold;
pub mod line_state;
pub mod style;

mod colourise;
mod style_context;

#[cfg(test)]
mod fold_unittests;

pub use colourise::colourise;
pub use fold::fold;
pub use style::Style;

use crate::document::Styler;
use crate::word_list::KeywordLists;

/// The common signature of both passes: range start, range length, the style byte at
/// the position before the range, the host keyword lists, and the host accessor.
pub type LexFn = fn(usize, usize, u8, &KeywordLists, &mut dyn Styler);

/// Everything a host needs to wire the lexer in: a stable numeric identifier, the
/// language tag, the two pass functions, and a description of each keyword list in
/// host loading order.
pub struct LexerModule {
    pub id: u32,
    pub language: &'static str,
    pub colourise: LexFn,
    pub fold: LexFn,
    pub word_list_descriptions: [&'static str; 4],
}

/// The Dart lexer descriptor.
pub const DART_LEXER: LexerModule = LexerModule {
    id: 137,
    language: "dart",
    colourise,
    fold,
    word_list_descriptions: [
        "Primary keywords",
        "Secondary keywords",
        "Tertiary keywords",
        "Global type definitions",
    ],
};

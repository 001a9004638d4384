//! The host side of the lexing contract.
//!
//! An editor embedding the lexer owns the text, the per-byte style array, and the
//! per-line state and fold-level arrays; the two passes reach all of them through the
//! [Styler] trait and retain nothing across calls. [TextDocument] is the in-memory
//! reference host used by the tests and the `dlx` front end.

use bstr::{BStr, ByteSlice};

use crate::lexer::fold::FOLD_LEVEL_BASE;
use crate::lexer::style::Style;

// A fold word for a line nobody has folded yet: at the base level, staying there.
const EMPTY_FOLD_WORD: i32 = FOLD_LEVEL_BASE | (FOLD_LEVEL_BASE << 16);

/// Accessor interface the host provides to both passes.
///
/// Reads past the end of the buffer answer `0`, and line queries past the last line
/// answer the buffer length, so the passes never have to range-check their lookahead.
pub trait Styler {
    /// Total length of the buffer in bytes.
    fn length(&self) -> usize;

    /// The input byte at `pos`, or `0` past the end.
    fn byte_at(&self, pos: usize) -> u8;

    /// The style byte previously committed at `pos`, or `0` past the end.
    fn style_at(&self, pos: usize) -> u8;

    /// The index of the line containing `pos`.
    fn line_of_pos(&self, pos: usize) -> usize;

    /// The position of the first byte of `line`; the buffer length when `line` is past
    /// the last line.
    fn line_start(&self, line: usize) -> usize;

    /// The stored per-line lexer state, `0` if never written.
    fn line_state(&self, line: usize) -> i32;

    fn set_line_state(&mut self, line: usize, state: i32);

    /// The stored fold level word, the base level if never written.
    fn level_at(&self, line: usize) -> i32;

    fn set_level(&mut self, line: usize, level: i32);

    /// Resets the styling cursor; subsequent [Styler::colour_to] calls commit runs from
    /// this position.
    fn start_styling(&mut self, pos: usize);

    /// Commits `style` to every byte from the styling cursor up to (excluding) `pos`
    /// and advances the cursor there.
    fn colour_to(&mut self, pos: usize, style: u8);
}

/// An in-memory document implementing [Styler].
///
/// Keeps the byte buffer alongside the style, line-state, and fold-level arrays a real
/// editor would own. The line index treats `\n` as the line terminator, which covers
/// both LF and CR LF sources; a trailing terminator opens one final empty line, the way
/// editors count lines.
pub struct TextDocument {
    text: Vec<u8>,
    styles: Vec<u8>,
    line_starts: Vec<usize>,
    line_states: Vec<i32>,
    levels: Vec<i32>,
    styled_to: usize,
}

impl TextDocument {
    pub fn new(text: impl Into<Vec<u8>>) -> TextDocument {
        let text = text.into();
        let mut line_starts = vec![0];
        let mut from = 0;
        while let Some(offset) = text[from..].find_byte(b'\n') {
            from += offset + 1;
            line_starts.push(from);
        }
        let lines = line_starts.len();
        TextDocument {
            styles: vec![0; text.len()],
            line_states: vec![0; lines],
            levels: vec![EMPTY_FOLD_WORD; lines],
            styled_to: 0,
            text,
            line_starts,
        }
    }

    pub fn text(&self) -> &BStr {
        self.text.as_bstr()
    }

    pub fn styles(&self) -> &[u8] {
        &self.styles
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The committed styling as maximal runs of equally-styled bytes, mostly useful for
    /// debugging and test output.
    pub fn style_runs(&self) -> Vec<StyleRun<'_>> {
        let mut runs = Vec::new();
        let mut start = 0;
        for pos in 1..=self.text.len() {
            if pos == self.text.len() || self.styles[pos] != self.styles[start] {
                runs.push(StyleRun {
                    style: Style::from_u8(self.styles[start]),
                    text: self.text[start..pos].as_bstr(),
                });
                start = pos;
            }
        }
        runs
    }
}

impl Styler for TextDocument {
    fn length(&self) -> usize {
        self.text.len()
    }

    fn byte_at(&self, pos: usize) -> u8 {
        self.text.get(pos).copied().unwrap_or(0)
    }

    fn style_at(&self, pos: usize) -> u8 {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn line_of_pos(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos) - 1
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.text.len())
    }

    fn line_state(&self, line: usize) -> i32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: usize, state: i32) {
        if let Some(slot) = self.line_states.get_mut(line) {
            *slot = state;
        }
    }

    fn level_at(&self, line: usize) -> i32 {
        self.levels.get(line).copied().unwrap_or(EMPTY_FOLD_WORD)
    }

    fn set_level(&mut self, line: usize, level: i32) {
        if let Some(slot) = self.levels.get_mut(line) {
            *slot = level;
        }
    }

    fn start_styling(&mut self, pos: usize) {
        self.styled_to = pos.min(self.text.len());
    }

    fn colour_to(&mut self, pos: usize, style: u8) {
        let pos = pos.min(self.text.len());
        while self.styled_to < pos {
            self.styles[self.styled_to] = style;
            self.styled_to += 1;
        }
    }
}

/// One maximal run of equally-styled bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleRun<'a> {
    pub style: Style,
    pub text: &'a BStr,
}

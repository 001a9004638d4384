use crate::document::Styler;

use super::style::Style;

/// Byte cursor over a styling range.
///
/// Walks the range one byte at a time with one byte of lookahead and lookbehind,
/// tracks line boundaries, and commits style runs to the host as the state changes.
/// The current [Style] doubles as the lexer's mode: the colouriser reads `state` to
/// decide what the current byte may do and calls [StyleContext::set_state] to close
/// the run behind it.
///
/// The cursor owns all position bookkeeping so the state machine above it stays free
/// of index arithmetic.
pub struct StyleContext<'a> {
    styler: &'a mut dyn Styler,
    end_pos: usize,
    line_doc_end: usize,

    pub pos: usize,
    pub current_line: usize,
    line_start_next: usize,
    pub at_line_start: bool,
    pub at_line_end: bool,
    pub state: Style,
    pub ch_prev: u8,
    pub ch: u8,
    pub ch_next: u8,
    segment_start: usize,
}

impl<'a> StyleContext<'a> {
    pub fn new(
        styler: &'a mut dyn Styler,
        start_pos: usize,
        length: usize,
        init_style: Style,
    ) -> StyleContext<'a> {
        styler.start_styling(start_pos);
        let end_pos = (start_pos + length).min(styler.length());
        let current_line = styler.line_of_pos(start_pos);
        let line_start_next = styler.line_start(current_line + 1);
        let line_doc_end = styler.line_of_pos(styler.length());
        let mut sc = StyleContext {
            end_pos,
            line_doc_end,
            pos: start_pos,
            current_line,
            line_start_next,
            at_line_start: styler.line_start(current_line) == start_pos,
            at_line_end: false,
            state: init_style,
            ch_prev: 0,
            ch: styler.byte_at(start_pos),
            ch_next: styler.byte_at(start_pos + 1),
            segment_start: start_pos,
            styler,
        };
        sc.refresh_at_line_end();
        sc
    }

    /// True while the cursor has bytes of the range left to process.
    pub fn more(&self) -> bool {
        self.pos < self.end_pos
    }

    /// Advances one byte, crossing line boundaries as they arrive.
    pub fn forward(&mut self) {
        if self.pos < self.end_pos {
            self.at_line_start = self.at_line_end;
            if self.at_line_start {
                self.current_line += 1;
                self.line_start_next = self.styler.line_start(self.current_line + 1);
            }
            self.ch_prev = self.ch;
            self.pos += 1;
            self.ch = self.ch_next;
            self.ch_next = self.styler.byte_at(self.pos + 1);
            self.refresh_at_line_end();
        } else {
            self.at_line_start = false;
            self.ch_prev = b' ';
            self.ch = b' ';
            self.ch_next = b' ';
            self.at_line_end = true;
        }
    }

    pub fn forward_n(&mut self, count: usize) {
        for _ in 0..count {
            self.forward();
        }
    }

    /// Closes the run behind the cursor with the current state and switches to `state`.
    /// The current byte is the first byte of the new run.
    pub fn set_state(&mut self, state: Style) {
        self.styler.colour_to(self.pos, self.state as u8);
        self.segment_start = self.pos;
        self.state = state;
    }

    /// Advances one byte and then closes the run, so the current byte is the last byte
    /// of the old run.
    pub fn forward_set_state(&mut self, state: Style) {
        self.forward();
        self.set_state(state);
    }

    /// Retags the open run without closing it, used when a lookahead or a completed
    /// word refines the style chosen at the start of the run.
    pub fn change_state(&mut self, state: Style) {
        self.state = state;
    }

    /// Flushes the final run. Call once after the main loop.
    pub fn complete(&mut self) {
        self.styler.colour_to(self.pos, self.state as u8);
    }

    /// True when the current and next bytes are `a` then `b`.
    pub fn match2(&self, a: u8, b: u8) -> bool {
        self.ch == a && self.ch_next == b
    }

    /// True when the current byte starts a run of three `quote` bytes.
    pub fn match3(&self, quote: u8) -> bool {
        self.ch == quote && self.ch_next == quote && self.styler.byte_at(self.pos + 2) == quote
    }

    /// Length of the run open behind the cursor.
    pub fn length_current(&self) -> usize {
        self.pos - self.segment_start
    }

    /// Copies the open run into `buffer`, truncating at its length, and returns the
    /// number of bytes written. A small fixed buffer suffices for keyword lookup.
    pub fn segment(&self, buffer: &mut [u8]) -> usize {
        let length = self.length_current().min(buffer.len());
        for (offset, slot) in buffer.iter_mut().enumerate().take(length) {
            *slot = self.styler.byte_at(self.segment_start + offset);
        }
        length
    }

    pub fn set_line_state(&mut self, line: usize, state: i32) {
        self.styler.set_line_state(line, state);
    }

    fn refresh_at_line_end(&mut self) {
        // Lines before the last end with their terminator byte; the last line of the
        // buffer only ends at the buffer end, matching the host's line accounting for
        // buffers without a trailing terminator.
        self.at_line_end = if self.current_line < self.line_doc_end {
            self.pos + 1 >= self.line_start_next
        } else {
            self.pos >= self.line_start_next
        };
    }
}

//! The colouring pass: a restartable state machine over the bytes of a Dart buffer.

use crate::document::Styler;
use crate::word_list::{KeywordIndex, KeywordLists};

use super::line_state::{
    LINE_STATE_INTERPOLATION, LINE_STATE_LINE_COMMENT, LINE_STATE_PACKAGE_IMPORT,
    COMMENT_DEPTH_SHIFT,
};
use super::style::Style;
use super::style_context::StyleContext;

/// Identifier text is buffered only long enough to test keyword membership; no Dart
/// keyword comes close to this length.
const MAX_WORD_LENGTH: usize = 64;

/// Tracks an escape sequence inside a non-raw string: the string state to return to,
/// how many hex digits may still follow, and whether a `\u{...}` brace form is open.
#[derive(Default)]
struct EscapeSequence {
    outer_state: Style,
    digits_left: i32,
    brace: bool,
}

impl EscapeSequence {
    /// Arms the tracker for the escape introduced by `\` with `ch_next` following.
    /// Any character may be escaped; a backslash at the end of the line starts nothing.
    fn reset(&mut self, state: Style, ch_next: u8) -> bool {
        if is_eol_char(ch_next) {
            return false;
        }
        self.outer_state = state;
        self.brace = false;
        self.digits_left = match ch_next {
            b'x' => 3,
            b'u' => 5,
            _ => 1,
        };
        true
    }

    fn at_escape_end(&mut self, ch: u8) -> bool {
        self.digits_left -= 1;
        self.digits_left <= 0 || !ch.is_ascii_hexdigit()
    }
}

/// One open `${...}` interpolation: the string state to resume once the braces balance.
struct InterpolationFrame {
    state: Style,
    brace_count: i32,
}

/// Walks stored line states backwards from the line containing `start_pos` until one
/// clears every bit of `state_mask`, then restarts from the line after it.
///
/// The interpolation stack is transient, so lexing inside an interpolated string must
/// resume from the string's opening line; the stack rebuilds itself on the way through.
/// Terminates because line 0 is an unconditional restart point.
pub(super) fn backtrack_to_start(
    styler: &dyn Styler,
    state_mask: i32,
    start_pos: usize,
    length: usize,
    init_style: u8,
) -> (usize, usize, u8) {
    let current_line = styler.line_of_pos(start_pos);
    if current_line == 0 {
        return (start_pos, length, init_style);
    }
    let mut line = current_line - 1;
    let mut line_state = styler.line_state(line);
    while (line_state & state_mask) != 0 && line != 0 {
        line -= 1;
        line_state = styler.line_state(line);
    }
    if (line_state & state_mask) == 0 {
        line += 1;
    }
    if line == current_line {
        return (start_pos, length, init_style);
    }
    let end_pos = start_pos + length;
    let start_pos = if line == 0 { 0 } else { styler.line_start(line) };
    let init_style = if start_pos == 0 { 0 } else { styler.style_at(start_pos - 1) };
    (start_pos, end_pos - start_pos, init_style)
}

/// Scans backwards over space-equivalent styles for the most recent significant byte,
/// seeding the `chPrevNonWhite` bookkeeping at a restart.
fn lookback_non_white(styler: &dyn Styler, start_pos: usize) -> u8 {
    let mut pos = start_pos;
    while pos != 0 {
        pos -= 1;
        if !Style::from_u8(styler.style_at(pos)).is_space_equiv() {
            return styler.byte_at(pos);
        }
    }
    0
}

/// Colours `[start_pos, start_pos + length)`, emitting style runs and per-line states
/// through `styler`. `init_style` is the style byte at `start_pos - 1`, or 0 at the
/// start of the buffer. Total: every byte of the range receives exactly one style.
pub fn colourise(
    start_pos: usize,
    length: usize,
    init_style: u8,
    keywords: &KeywordLists,
    styler: &mut dyn Styler,
) {
    let (start_pos, length, init_style) = if start_pos != 0 {
        backtrack_to_start(&*styler, LINE_STATE_INTERPOLATION, start_pos, length, init_style)
    } else {
        (start_pos, length, init_style)
    };

    // Either a line-comment or a package-import flag, decided by the first token.
    let mut line_state_line_type: i32 = 0;
    // Nested block-comment depth, persisted per line so a restart needs no backtrack.
    let mut comment_level: i32 = 0;
    let mut interpolation_stack: Vec<InterpolationFrame> = Vec::new();

    let mut visible_chars: usize = 0;
    let mut ch_before: u8 = 0;
    let mut ch_prev_non_white: u8 = 0;
    let mut escape = EscapeSequence::default();

    let init = Style::from_u8(init_style);
    let current_line = styler.line_of_pos(start_pos);
    if current_line > 0 {
        comment_level = styler.line_state(current_line - 1) >> COMMENT_DEPTH_SHIFT;
    }
    if start_pos != 0 && init.is_space_equiv() {
        ch_prev_non_white = lookback_non_white(&*styler, start_pos);
        ch_before = ch_prev_non_white;
    }

    let mut sc = StyleContext::new(styler, start_pos, length, init);
    if start_pos == 0 && sc.match2(b'#', b'!') {
        // Shell shebang at the start of the buffer.
        sc.set_state(Style::CommentLine);
        sc.forward();
        line_state_line_type = LINE_STATE_LINE_COMMENT;
    }

    while sc.more() {
        match sc.state {
            Style::Operator | Style::OperatorString => {
                sc.set_state(Style::Default);
            }

            Style::Number => {
                if !is_number_continue(sc.ch_prev, sc.ch, sc.ch_next) {
                    sc.set_state(Style::Default);
                }
            }

            Style::Identifier
            | Style::IdentifierString
            | Style::Metadata
            | Style::SymbolIdentifier => {
                if !is_ident_char(sc.ch)
                    || (sc.ch == b'$' && sc.state == Style::IdentifierString)
                {
                    if matches!(sc.state, Style::Metadata | Style::SymbolIdentifier) {
                        if sc.ch == b'.' {
                            // Dotted annotation or symbol: the dot is an operator and
                            // the same state resumes after it.
                            let state = sc.state;
                            sc.set_state(Style::Operator);
                            sc.forward_set_state(state);
                            continue;
                        }
                    } else {
                        let mut word = [0u8; MAX_WORD_LENGTH];
                        let word_length = sc.segment(&mut word);
                        let word = &word[..word_length];
                        let state = sc.state;
                        if state == Style::IdentifierString {
                            sc.set_state(escape.outer_state);
                            continue;
                        } else if keywords.list(KeywordIndex::Primary).contains(word) {
                            sc.change_state(Style::KwPrimary);
                            if (word == b"import" || word == b"part")
                                && visible_chars == sc.length_current()
                            {
                                line_state_line_type = LINE_STATE_PACKAGE_IMPORT;
                            }
                        } else if keywords.list(KeywordIndex::Secondary).contains(word) {
                            sc.change_state(Style::KwSecondary);
                        } else if keywords.list(KeywordIndex::Tertiary).contains(word) {
                            sc.change_state(Style::KwTertiary);
                        } else if keywords.list(KeywordIndex::Type).contains(word) {
                            sc.change_state(Style::KwType);
                        } else if state == Style::Identifier
                            && sc.ch == b':'
                            && matches!(ch_before, b',' | b'{' | b'(')
                        {
                            // Map key or named parameter.
                            sc.change_state(Style::Key);
                        }
                    }
                    sc.set_state(Style::Default);
                }
            }

            Style::SymbolOperator => {
                if !is_definable_operator(sc.ch) {
                    sc.set_state(Style::Default);
                }
            }

            Style::CommentLine | Style::CommentLineDoc => {
                if sc.at_line_start {
                    sc.set_state(Style::Default);
                }
            }

            Style::CommentBlock | Style::CommentBlockDoc => {
                if sc.match2(b'*', b'/') {
                    sc.forward();
                    comment_level -= 1;
                    if comment_level <= 0 {
                        // A depth of zero from a stale restart clamps rather than
                        // trapping the rest of the buffer in the comment.
                        comment_level = 0;
                        sc.forward_set_state(Style::Default);
                    }
                } else if sc.match2(b'/', b'*') {
                    sc.forward();
                    comment_level += 1;
                }
            }

            Style::StringSq
            | Style::StringDq
            | Style::TripleStringSq
            | Style::TripleStringDq
            | Style::RawStringSq
            | Style::RawStringDq
            | Style::TripleRawStringSq
            | Style::TripleRawStringDq => {
                let state = sc.state;
                if sc.at_line_start && !state.is_triple_string() {
                    // Unterminated single-line string.
                    sc.set_state(Style::Default);
                } else if sc.ch == b'\\' && !state.is_raw() {
                    if escape.reset(state, sc.ch_next) {
                        sc.set_state(Style::EscapeChar);
                        sc.forward();
                        if sc.match2(b'u', b'{') {
                            escape.brace = true;
                            escape.digits_left = 7; // Unicode code point
                            sc.forward();
                        }
                    }
                } else if sc.ch == b'$' && !state.is_raw() {
                    escape.outer_state = state;
                    sc.set_state(Style::OperatorString);
                    sc.forward();
                    if sc.ch == b'{' {
                        interpolation_stack
                            .push(InterpolationFrame { state: escape.outer_state, brace_count: 1 });
                    } else if sc.ch != b'$' && is_ident_start(sc.ch) {
                        sc.set_state(Style::IdentifierString);
                    } else {
                        // A lone `$`: keep it interpolation-styled, resume the string.
                        sc.set_state(escape.outer_state);
                        continue;
                    }
                } else if sc.ch == state.quote()
                    && (!state.is_triple_string() || sc.match3(state.quote()))
                {
                    if state.is_triple_string() {
                        sc.forward_n(2);
                    }
                    sc.forward();
                    sc.set_state(Style::Default);
                }
            }

            Style::EscapeChar => {
                if escape.at_escape_end(sc.ch) {
                    if escape.brace && sc.ch == b'}' {
                        sc.forward();
                    }
                    sc.set_state(escape.outer_state);
                    continue;
                }
            }

            _ => {}
        }

        if sc.state == Style::Default {
            if sc.ch == b'/' && (sc.ch_next == b'/' || sc.ch_next == b'*') {
                let second = sc.ch_next;
                sc.set_state(if second == b'/' { Style::CommentLine } else { Style::CommentBlock });
                sc.forward_n(2);
                // `///` and `/**` are doc comments unless a fourth repeat follows.
                if sc.ch == second && sc.ch_next != second {
                    if sc.state == Style::CommentLine {
                        sc.change_state(Style::CommentLineDoc);
                    } else {
                        sc.change_state(Style::CommentBlockDoc);
                    }
                }
                if second == b'/' {
                    if visible_chars == 0 {
                        line_state_line_type = LINE_STATE_LINE_COMMENT;
                    }
                } else {
                    comment_level = 1;
                }
                continue;
            }
            if sc.ch == b'r' && (sc.ch_next == b'\'' || sc.ch_next == b'"') {
                sc.set_state(if sc.ch_next == b'\'' {
                    Style::RawStringSq
                } else {
                    Style::RawStringDq
                });
                sc.forward_n(2);
                if sc.ch_prev == b'\'' && sc.match2(b'\'', b'\'') {
                    sc.change_state(Style::TripleRawStringSq);
                    sc.forward_n(2);
                } else if sc.ch_prev == b'"' && sc.match2(b'"', b'"') {
                    sc.change_state(Style::TripleRawStringDq);
                    sc.forward_n(2);
                }
                continue;
            }
            if sc.ch == b'"' {
                if sc.match3(b'"') {
                    sc.set_state(Style::TripleStringDq);
                    sc.forward_n(2);
                } else {
                    ch_before = ch_prev_non_white;
                    sc.set_state(Style::StringDq);
                }
            } else if sc.ch == b'\'' {
                if sc.match3(b'\'') {
                    sc.set_state(Style::TripleStringSq);
                    sc.forward_n(2);
                } else {
                    ch_before = ch_prev_non_white;
                    sc.set_state(Style::StringSq);
                }
            } else if is_number_start(sc.ch, sc.ch_next) {
                sc.set_state(Style::Number);
            } else if (sc.ch == b'@' || sc.ch == b'#') && is_ident_start(sc.ch_next) {
                sc.set_state(if sc.ch == b'@' { Style::Metadata } else { Style::SymbolIdentifier });
            } else if is_ident_start(sc.ch) {
                ch_before = ch_prev_non_white;
                sc.set_state(Style::Identifier);
            } else if sc.ch == b'#' && is_definable_operator(sc.ch_next) {
                sc.set_state(Style::SymbolOperator);
            } else if is_graphic(sc.ch) {
                sc.set_state(Style::Operator);
                if (sc.ch == b'{' || sc.ch == b'}') && !interpolation_stack.is_empty() {
                    if let Some(current) = interpolation_stack.last_mut() {
                        if sc.ch == b'{' {
                            current.brace_count += 1;
                        } else {
                            current.brace_count -= 1;
                            if current.brace_count == 0 {
                                // The brace closing the interpolation belongs to the
                                // string, and the string state resumes after it.
                                let outer = current.state;
                                sc.change_state(Style::OperatorString);
                                sc.forward_set_state(outer);
                                interpolation_stack.pop();
                                continue;
                            }
                        }
                    }
                }
            }
        }

        if !is_space_char(sc.ch) {
            visible_chars += 1;
            if !sc.state.is_space_equiv() {
                ch_prev_non_white = sc.ch;
            }
        }
        if sc.at_line_end {
            let mut line_state = (comment_level << COMMENT_DEPTH_SHIFT) | line_state_line_type;
            if !interpolation_stack.is_empty() {
                line_state |= LINE_STATE_INTERPOLATION;
            }
            let line = sc.current_line;
            sc.set_line_state(line, line_state);
            line_state_line_type = 0;
            visible_chars = 0;
        }
        sc.forward();
    }

    sc.complete();
}

fn is_eol_char(ch: u8) -> bool {
    ch == b'\r' || ch == b'\n'
}

// Printable ASCII, excluding control characters and blank space.
fn is_graphic(ch: u8) -> bool {
    ch > 32 && ch < 127
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

fn is_ident_char(ch: u8) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

fn is_number_start(ch: u8, ch_next: u8) -> bool {
    ch.is_ascii_digit() || (ch == b'.' && ch_next.is_ascii_digit())
}

// Identifier-like continuation keeps hex digits and exponent letters inside the run;
// `$` is excluded because numbers never contain one.
fn is_number_continue(ch_prev: u8, ch: u8, ch_next: u8) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == b'_'
        || ((ch == b'+' || ch == b'-') && (ch_prev == b'e' || ch_prev == b'E'))
        || (ch == b'.' && ch_next != b'.')
}

// The operator tokens Dart permits as the target of a symbol literal.
fn is_definable_operator(ch: u8) -> bool {
    matches!(
        ch,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'~' | b'&' | b'|' | b'^' | b'<' | b'>' | b'=' | b'['
            | b']'
    )
}

fn is_space_char(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

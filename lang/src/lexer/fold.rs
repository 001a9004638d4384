//! The folding pass: per-line fold levels computed from the stored styles and states.

use crate::document::Styler;
use crate::word_list::KeywordLists;

use super::line_state::LineState;
use super::style::Style;

/// The resting fold level of unnested text. Emitted levels never drop below it.
pub const FOLD_LEVEL_BASE: i32 = 0x400;

/// Set on the fold word of a line that opens deeper structure.
pub const FOLD_LEVEL_HEADER_FLAG: i32 = 0x2000;

/// Masks the level number out of the low half of a fold word.
pub const FOLD_LEVEL_NUMBER_MASK: i32 = 0x0fff;

/// The two line flags folding groups runs of: contiguous comment lines fold as one
/// block, and so do contiguous import lines.
#[derive(Clone, Copy, Default)]
struct FoldLineState {
    line_comment: i32,
    package_import: i32,
}

impl FoldLineState {
    fn new(raw: i32) -> FoldLineState {
        let state = LineState::decode(raw);
        FoldLineState {
            line_comment: state.line_comment as i32,
            package_import: state.package_import as i32,
        }
    }
}

/// Computes fold levels for every line touched by `[start_pos, start_pos + length)`
/// and stores them through `styler`. Runs after colouring; consumes the style array
/// and the per-line states, never the raw syntax. The keyword lists are part of the
/// common pass signature but folding has no use for them.
pub fn fold(
    start_pos: usize,
    length: usize,
    init_style: u8,
    _keywords: &KeywordLists,
    styler: &mut dyn Styler,
) {
    let end_pos = (start_pos + length).min(styler.length());
    let mut line_current = styler.line_of_pos(start_pos);
    let mut fold_prev = FoldLineState::default();
    let mut level_current = FOLD_LEVEL_BASE;
    if line_current > 0 {
        level_current = styler.level_at(line_current - 1) >> 16;
        fold_prev = FoldLineState::new(styler.line_state(line_current - 1));
    }

    let mut level_next = level_current;
    let mut fold_current = FoldLineState::new(styler.line_state(line_current));
    let mut line_start_next = styler.line_start(line_current + 1).min(end_pos);

    let mut pos = start_pos;
    let mut ch_next = styler.byte_at(pos);
    let mut style_next = Style::from_u8(styler.style_at(pos));
    let mut style = Style::from_u8(init_style);

    while pos < end_pos {
        let ch = ch_next;
        let style_prev = style;
        style = style_next;
        pos += 1;
        ch_next = styler.byte_at(pos);
        style_next = Style::from_u8(styler.style_at(pos));

        match style {
            Style::CommentBlock | Style::CommentBlockDoc => {
                let level = if ch == b'/' && ch_next == b'*' {
                    1
                } else if ch == b'*' && ch_next == b'/' {
                    -1
                } else {
                    0
                };
                if level != 0 {
                    level_next += level;
                    // Consume both marker bytes so `/*/` cannot count twice.
                    pos += 1;
                    ch_next = styler.byte_at(pos);
                    style_next = Style::from_u8(styler.style_at(pos));
                }
            }

            Style::TripleStringSq
            | Style::TripleStringDq
            | Style::TripleRawStringSq
            | Style::TripleRawStringDq => {
                // Escapes and interpolation inside the string are transparent; only a
                // transition to or from genuinely outside text opens or closes the fold.
                if style != style_prev && !style_prev.is_string_interior() {
                    level_next += 1;
                }
                if style != style_next && !style_next.is_string_interior() {
                    level_next -= 1;
                }
            }

            Style::Operator | Style::OperatorString => {
                if matches!(ch, b'{' | b'[' | b'(') {
                    level_next += 1;
                } else if matches!(ch, b'}' | b']' | b')') {
                    level_next -= 1;
                }
            }

            _ => {}
        }

        if pos == line_start_next {
            let fold_next = FoldLineState::new(styler.line_state(line_current + 1));
            level_next = level_next.max(FOLD_LEVEL_BASE);
            if fold_current.line_comment != 0 {
                level_next += fold_next.line_comment - fold_prev.line_comment;
            } else if fold_current.package_import != 0 {
                level_next += fold_next.package_import - fold_prev.package_import;
            }

            let level_use = level_current;
            let mut level_word = level_use | (level_next << 16);
            if level_use < level_next {
                level_word |= FOLD_LEVEL_HEADER_FLAG;
            }
            styler.set_level(line_current, level_word);

            line_current += 1;
            line_start_next = styler.line_start(line_current + 1).min(end_pos);
            level_current = level_next;
            fold_prev = fold_current;
            fold_current = fold_next;
        }
    }
}

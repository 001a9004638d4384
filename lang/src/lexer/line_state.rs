//! The packed per-line state the host stores between lexer invocations.
//!
//! The colouriser writes one `i32` per line at each line end; the folder and the next
//! colouriser invocation read it back. The low bits carry three line flags, the bits
//! from [COMMENT_DEPTH_SHIFT] up carry the nested block-comment depth. The layout is
//! part of the persisted contract with the host and must not change.

/// Set when the line is a shebang or begins with `//` before any other visible text.
pub const LINE_STATE_LINE_COMMENT: i32 = 1;

/// Set when the line begins with the word `import` or `part`.
pub const LINE_STATE_PACKAGE_IMPORT: i32 = 1 << 1;

/// Set when a string interpolation was still open at the end of the line. The
/// interpolation stack itself is transient, so a restart inside an interpolated string
/// backtracks to the first line without this flag.
pub const LINE_STATE_INTERPOLATION: i32 = 1 << 2;

/// Bit position of the block-comment depth field. Bit 3 is reserved.
pub const COMMENT_DEPTH_SHIFT: u32 = 4;

const_assert_eq!(LINE_STATE_LINE_COMMENT & LINE_STATE_PACKAGE_IMPORT, 0);
const_assert_eq!(LINE_STATE_PACKAGE_IMPORT & LINE_STATE_INTERPOLATION, 0);
const_assert!((1 << COMMENT_DEPTH_SHIFT) > LINE_STATE_INTERPOLATION << 1);

/// Decoded view of a stored line state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineState {
    pub line_comment: bool,
    pub package_import: bool,
    pub interpolation: bool,
    pub comment_depth: i32,
}

impl LineState {
    pub fn decode(raw: i32) -> LineState {
        LineState {
            line_comment: raw & LINE_STATE_LINE_COMMENT != 0,
            package_import: raw & LINE_STATE_PACKAGE_IMPORT != 0,
            interpolation: raw & LINE_STATE_INTERPOLATION != 0,
            comment_depth: raw >> COMMENT_DEPTH_SHIFT,
        }
    }

    pub fn encode(self) -> i32 {
        let mut raw = self.comment_depth << COMMENT_DEPTH_SHIFT;
        if self.line_comment {
            raw |= LINE_STATE_LINE_COMMENT;
        }
        if self.package_import {
            raw |= LINE_STATE_PACKAGE_IMPORT;
        }
        if self.interpolation {
            raw |= LINE_STATE_INTERPOLATION;
        }
        raw
    }
}

/// The lexical style attached to each byte of a coloured buffer.
///
/// Style values are stable small integers shared with the host's renderer; they are part
/// of the external contract and must never be renumbered. Every byte of a coloured range
/// carries exactly one style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Style {
    /// Blank space and anything the lexer has no better answer for.
    #[default]
    Default = 0,

    /// A `//` comment, terminated by the end of the line.
    CommentLine = 1,

    /// A `///` documentation comment. A fourth `/` demotes it back to a plain comment.
    CommentLineDoc = 2,

    /// A `/* ... */` comment, including any nested comments within.
    CommentBlock = 3,

    /// A `/** ... */` documentation comment.
    CommentBlockDoc = 4,

    /// A numeric literal, integer or floating point.
    Number = 5,

    /// A name that matched none of the keyword lists.
    Identifier = 6,

    /// A word from the primary keyword list.
    KwPrimary = 7,

    /// A word from the secondary keyword list.
    KwSecondary = 8,

    /// A word from the tertiary keyword list.
    KwTertiary = 9,

    /// A word from the global type definitions list.
    KwType = 10,

    /// A map key or named parameter, an identifier immediately followed by `:`.
    Key = 11,

    /// A single-quoted string literal.
    StringSq = 12,

    /// A double-quoted string literal.
    StringDq = 13,

    /// A `'''` triple-quoted string literal, which may span lines.
    TripleStringSq = 14,

    /// A `"""` triple-quoted string literal, which may span lines.
    TripleStringDq = 15,

    /// An `r'...'` raw string literal; `\` and `$` carry no meaning inside.
    RawStringSq = 16,

    /// An `r"..."` raw string literal.
    RawStringDq = 17,

    /// An `r'''...'''` triple-quoted raw string literal.
    TripleRawStringSq = 18,

    /// An `r"""..."""` triple-quoted raw string literal.
    TripleRawStringDq = 19,

    /// An escape sequence inside a non-raw string, `\n` or `\u{1F600}` for example.
    EscapeChar = 20,

    /// An identifier interpolated into a string with `$name`.
    IdentifierString = 21,

    /// Interpolation punctuation inside a string: the `$`, and the `{` and `}` that
    /// bracket a `${...}` expression.
    OperatorString = 22,

    /// Operator and punctuation characters at expression level.
    Operator = 23,

    /// An `@identifier` annotation.
    Metadata = 24,

    /// A `#identifier` symbol literal.
    SymbolIdentifier = 25,

    /// A `#<=`-style symbol literal naming a definable operator.
    SymbolOperator = 26,
}

// The style byte array stored by the host is one byte per input byte.
assert_eq_size!(Style, u8);

impl Style {
    /// Recovers a [Style] from a host-stored style byte. Unknown bytes decay to
    /// [Style::Default] so that a damaged style buffer cannot take the lexer down.
    pub fn from_u8(style: u8) -> Style {
        match style {
            0 => Style::Default,
            1 => Style::CommentLine,
            2 => Style::CommentLineDoc,
            3 => Style::CommentBlock,
            4 => Style::CommentBlockDoc,
            5 => Style::Number,
            6 => Style::Identifier,
            7 => Style::KwPrimary,
            8 => Style::KwSecondary,
            9 => Style::KwTertiary,
            10 => Style::KwType,
            11 => Style::Key,
            12 => Style::StringSq,
            13 => Style::StringDq,
            14 => Style::TripleStringSq,
            15 => Style::TripleStringDq,
            16 => Style::RawStringSq,
            17 => Style::RawStringDq,
            18 => Style::TripleRawStringSq,
            19 => Style::TripleRawStringDq,
            20 => Style::EscapeChar,
            21 => Style::IdentifierString,
            22 => Style::OperatorString,
            23 => Style::Operator,
            24 => Style::Metadata,
            25 => Style::SymbolIdentifier,
            26 => Style::SymbolOperator,
            _ => Style::Default,
        }
    }

    /// True for styles that read as blank space when scanning backwards for the most
    /// recent significant character: default and all four comment styles.
    pub fn is_space_equiv(self) -> bool {
        matches!(
            self,
            Style::Default
                | Style::CommentLine
                | Style::CommentLineDoc
                | Style::CommentBlock
                | Style::CommentBlockDoc
        )
    }

    /// True for any of the eight string styles.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Style::StringSq
                | Style::StringDq
                | Style::TripleStringSq
                | Style::TripleStringDq
                | Style::RawStringSq
                | Style::RawStringDq
                | Style::TripleRawStringSq
                | Style::TripleRawStringDq
        )
    }

    /// True for the four triple-quoted string styles, the only strings that span lines.
    pub fn is_triple_string(self) -> bool {
        matches!(
            self,
            Style::TripleStringSq
                | Style::TripleStringDq
                | Style::TripleRawStringSq
                | Style::TripleRawStringDq
        )
    }

    /// True for the four double-quoted string styles.
    pub fn is_double_quoted(self) -> bool {
        matches!(
            self,
            Style::StringDq
                | Style::TripleStringDq
                | Style::RawStringDq
                | Style::TripleRawStringDq
        )
    }

    /// True for the four raw string styles, in which `\` and `$` are ordinary bytes.
    pub fn is_raw(self) -> bool {
        matches!(
            self,
            Style::RawStringSq
                | Style::RawStringDq
                | Style::TripleRawStringSq
                | Style::TripleRawStringDq
        )
    }

    /// True for the styles that occur only embedded inside a string: escapes and the two
    /// interpolation styles. The folder treats these as transparent so that a `$...`
    /// inside a triple string does not spuriously close its fold.
    pub fn is_string_interior(self) -> bool {
        matches!(self, Style::EscapeChar | Style::OperatorString | Style::IdentifierString)
    }

    /// The quote byte that closes a string in this style.
    pub fn quote(self) -> u8 {
        if self.is_double_quoted() {
            b'"'
        } else {
            b'\''
        }
    }
}

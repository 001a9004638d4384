//! Keyword word lists consulted by the colouriser.
//!
//! The host loads four lists once and hands them to every lexer invocation; the
//! colouriser only ever asks whether a completed identifier is a member. Lists are
//! addressed by fixed index so the host can fill them from its own configuration.

use rustc_hash::FxHashSet;

/// An unordered set of words with an exact-match, case-sensitive membership test.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: FxHashSet<Box<[u8]>>,
}

impl WordList {
    pub fn new() -> WordList {
        WordList::default()
    }

    /// Builds a list from a whitespace-separated string of words, the form keyword
    /// lists usually take in editor configuration files.
    pub fn from_words(words: &str) -> WordList {
        WordList { words: words.split_whitespace().map(|w| w.as_bytes().into()).collect() }
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Index of one of the four keyword lists. The order is significant: identifier
/// classification takes the first list that matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordIndex {
    Primary = 0,
    Secondary = 1,
    Tertiary = 2,
    Type = 3,
}

/// The four host-loaded keyword lists, addressed by [KeywordIndex].
#[derive(Clone, Debug, Default)]
pub struct KeywordLists {
    lists: [WordList; 4],
}

impl KeywordLists {
    pub fn new(lists: [WordList; 4]) -> KeywordLists {
        KeywordLists { lists }
    }

    pub fn list(&self, index: KeywordIndex) -> &WordList {
        &self.lists[index as usize]
    }

    /// The stock Dart lists used by the `dlx` front end and the tests. A host with its
    /// own configuration supplies its own lists instead.
    pub fn default_dart() -> KeywordLists {
        KeywordLists::new([
            WordList::from_words(
                "as assert break case catch class const continue default do else enum \
                 extends false final finally for if import in is new null part rethrow \
                 return super switch this throw true try var void while with",
            ),
            WordList::from_words(
                "abstract async await base covariant deferred dynamic export extension \
                 external factory get hide implements interface late library mixin of on \
                 operator required sealed set show static sync typedef when yield",
            ),
            WordList::from_words("deprecated identical override pragma print"),
            WordList::from_words(
                "BigInt Comparable DateTime Duration Error Exception Function Future \
                 FutureOr Iterable Iterator List Map Never Null Object Pattern Record \
                 RegExp Runes Set Stream String StringBuffer Symbol Type Uri bool double \
                 int num",
            ),
        ])
    }
}

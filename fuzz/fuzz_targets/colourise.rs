#![no_main]

use libfuzzer_sys::fuzz_target;

use dartlex::document::{Styler, TextDocument};
use dartlex::lexer::colourise;
use dartlex::word_list::KeywordLists;

fuzz_target!(|data: &[u8]| {
    let mut doc = TextDocument::new(data);
    let keywords = KeywordLists::default_dart();
    colourise(0, doc.length(), 0, &keywords, &mut doc);
    // The pass is total: every byte of the buffer must come out styled.
    let styled: usize = doc.style_runs().iter().map(|run| run.text.len()).sum();
    assert_eq!(styled, data.len());
});

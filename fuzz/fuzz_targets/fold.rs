#![no_main]

use libfuzzer_sys::fuzz_target;

use dartlex::document::{Styler, TextDocument};
use dartlex::lexer::fold::{fold, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG, FOLD_LEVEL_NUMBER_MASK};
use dartlex::lexer::colourise;
use dartlex::word_list::KeywordLists;

fuzz_target!(|data: &[u8]| {
    let mut doc = TextDocument::new(data);
    let keywords = KeywordLists::default_dart();
    colourise(0, doc.length(), 0, &keywords, &mut doc);
    fold(0, doc.length(), 0, &keywords, &mut doc);
    // Levels never drop below the base, and the header flag tracks a rising level.
    for line in 0..doc.line_count() {
        let word = doc.level_at(line);
        let level = word & FOLD_LEVEL_NUMBER_MASK;
        let next = word >> 16;
        assert!(level >= FOLD_LEVEL_BASE);
        assert_eq!(word & FOLD_LEVEL_HEADER_FLAG != 0, level < next);
    }
});

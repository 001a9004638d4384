#[cfg(test)]
mod tests {
    use crate::dart;
    use crate::document::{Styler, TextDocument};
    use crate::lexer::fold::{
        fold, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG, FOLD_LEVEL_NUMBER_MASK,
    };
    use crate::lexer::colourise;
    use crate::source::SourceBuffer;
    use crate::word_list::KeywordLists;

    /// Colours and folds the whole buffer, then compares a per-line summary of the fold
    /// words: the level of the line, the level the next line starts at (both relative
    /// to the base level), and whether the line is a fold header.
    fn check_folding(source: &SourceBuffer, expect: &str) {
        let doc = colour_and_fold(source);
        let actual: String =
            (0..doc.line_count()).map(|line| format!("\n{}", fold_summary(&doc, line))).collect();
        assert_eq!(expect, &actual, "fold mismatch for {}", source.file_name());
    }

    fn colour_and_fold(source: &SourceBuffer) -> TextDocument {
        let mut doc = TextDocument::new(source.code());
        let keywords = KeywordLists::default_dart();
        colourise(0, doc.length(), 0, &keywords, &mut doc);
        fold(0, doc.length(), 0, &keywords, &mut doc);
        doc
    }

    fn fold_summary(doc: &TextDocument, line: usize) -> String {
        let word = doc.level_at(line);
        let level = (word & FOLD_LEVEL_NUMBER_MASK) - FOLD_LEVEL_BASE;
        let next = (word >> 16) - FOLD_LEVEL_BASE;
        let header = if word & FOLD_LEVEL_HEADER_FLAG != 0 { " header" } else { "" };
        format!("line {line}: level {level} next {next}{header}")
    }

    #[test]
    fn braces_open_and_close_folds() {
        check_folding(
            dart!("void f() {\n  var x = 1;\n}\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 1
line 2: level 1 next 0
line 3: level 0 next 0"#,
        );
    }

    #[test]
    fn nested_block_comments_fold_per_level() {
        check_folding(
            dart!("/*\n/*\nx\n*/\n*/\ny\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 2 header
line 2: level 2 next 2
line 3: level 2 next 1
line 4: level 1 next 0
line 5: level 0 next 0
line 6: level 0 next 0"#,
        );
    }

    #[test]
    fn contiguous_line_comments_fold_as_one_block() {
        check_folding(
            dart!("// a\n// b\n// c\nx\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 1
line 2: level 1 next 0
line 3: level 0 next 0
line 4: level 0 next 0"#,
        );
    }

    #[test]
    fn contiguous_imports_fold_as_one_block() {
        check_folding(
            dart!("import 'a.dart';\nimport 'b.dart';\nvoid x;\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 0
line 2: level 0 next 0
line 3: level 0 next 0"#,
        );
    }

    #[test]
    fn triple_strings_fold_across_lines() {
        check_folding(
            dart!("void f() {\n  var s = '''\nhello\n''';\n}\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 2 header
line 2: level 2 next 2
line 3: level 2 next 1
line 4: level 1 next 0
line 5: level 0 next 0"#,
        );
    }

    #[test]
    fn interpolation_does_not_break_a_triple_string_fold() {
        // The `${x}` inside the string swaps styles but never closes the string fold;
        // its braces balance within the line.
        check_folding(
            dart!("var s = '''\n${x}\n''';\n"),
            r#"
line 0: level 0 next 1 header
line 1: level 1 next 1
line 2: level 1 next 0
line 3: level 0 next 0"#,
        );
        // All on one line: no net fold at all.
        check_folding(
            dart!("var s = '''a${x}b''';\n"),
            r#"
line 0: level 0 next 0
line 1: level 0 next 0"#,
        );
    }

    #[test]
    fn a_shebang_line_gets_no_fold_of_its_own() {
        check_folding(
            dart!("#!/usr/bin/env dart\nvoid main(){}\n"),
            r#"
line 0: level 0 next 0
line 1: level 0 next 0
line 2: level 0 next 0"#,
        );
    }

    #[test]
    fn unbalanced_closers_clamp_at_the_base_level() {
        check_folding(
            dart!("}\n}\nx\n"),
            r#"
line 0: level 0 next 0
line 1: level 0 next 0
line 2: level 0 next 0
line 3: level 0 next 0"#,
        );
    }

    #[test]
    fn header_flag_is_set_exactly_when_the_level_rises() {
        let doc = colour_and_fold(dart!("void f() {\n  g(() {\n  });\n}\n"));
        for line in 0..doc.line_count() {
            let word = doc.level_at(line);
            let level = word & FOLD_LEVEL_NUMBER_MASK;
            let next = word >> 16;
            assert_eq!(
                word & FOLD_LEVEL_HEADER_FLAG != 0,
                level < next,
                "header law violated on line {line}"
            );
        }
    }

    #[test]
    fn folding_a_sub_range_matches_the_full_fold() {
        let source = dart!("void f() {\n  var s = '''\nhello\n''';\n}\n");
        let full = colour_and_fold(source);

        let mut partial = TextDocument::new(source.code());
        let keywords = KeywordLists::default_dart();
        colourise(0, partial.length(), 0, &keywords, &mut partial);
        // Fold the first two lines, then the rest as a second invocation picking up
        // from the stored level of the line before.
        let pos = partial.line_start(2);
        fold(0, pos, 0, &keywords, &mut partial);
        let init_style = partial.style_at(pos - 1);
        fold(pos, partial.length() - pos, init_style, &keywords, &mut partial);

        for line in 0..full.line_count() {
            assert_eq!(
                full.level_at(line),
                partial.level_at(line),
                "fold word mismatch on line {line}"
            );
        }
    }

    #[test]
    fn refolding_after_a_no_op_recolour_is_stable() {
        let source = dart!("import 'a.dart';\nvoid f() {\n  // note\n  // more\n}\n");
        let mut doc = TextDocument::new(source.code());
        let keywords = KeywordLists::default_dart();
        colourise(0, doc.length(), 0, &keywords, &mut doc);
        fold(0, doc.length(), 0, &keywords, &mut doc);
        let first: Vec<i32> = (0..doc.line_count()).map(|line| doc.level_at(line)).collect();

        colourise(0, doc.length(), 0, &keywords, &mut doc);
        fold(0, doc.length(), 0, &keywords, &mut doc);
        let second: Vec<i32> = (0..doc.line_count()).map(|line| doc.level_at(line)).collect();
        assert_eq!(first, second);
    }
}

use bstr::ByteSlice;

use dartlex::document::{Styler, TextDocument};
use dartlex::lexer;
use dartlex::lexer::fold::{FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG, FOLD_LEVEL_NUMBER_MASK};
use dartlex::source::SourceBuffer;
use dartlex::word_list::KeywordLists;

const HELP: &str = "\
    dlx - the dartlex Dart syntax colouriser

    USAGE:
        dlx [--pass PASS] [--quiet] FILENAME

    OPTIONS:
        --pass PASS         Which pass to report. PASS is one of 'colour' (the default),
                            which prints the style runs, or 'fold', which prints the
                            per-line fold levels.
        --quiet             If present, all non-error output is suppressed.

    ARGS:
        FILENAME            The path to the Dart source file to analyse.
";

#[derive(Debug, Eq, PartialEq)]
enum Pass {
    Colour,
    Fold,
}

#[derive(Debug, Eq, PartialEq)]
struct DlxArgs {
    pass: Pass,
    quiet: bool,
    source_file: std::path::PathBuf,
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    let source = SourceBuffer::new_from_file(&args.source_file);
    let source = match source {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error opening source file {}: {}", args.source_file.display(), e);
            std::process::exit(1);
        }
    };

    let mut doc = TextDocument::new(source.code());
    let keywords = KeywordLists::default_dart();
    lexer::colourise(0, doc.length(), 0, &keywords, &mut doc);

    match args.pass {
        Pass::Colour => {
            if !args.quiet {
                println!("StyleRuns [");
                for run in doc.style_runs() {
                    println!("    {:?},", run);
                }
                println!("]");
            }
        }
        Pass::Fold => {
            lexer::fold(0, doc.length(), 0, &keywords, &mut doc);
            if !args.quiet {
                for line in 0..doc.line_count() {
                    let word = doc.level_at(line);
                    let level = (word & FOLD_LEVEL_NUMBER_MASK) - FOLD_LEVEL_BASE;
                    let next = (word >> 16) - FOLD_LEVEL_BASE;
                    let header =
                        if word & FOLD_LEVEL_HEADER_FLAG != 0 { " header" } else { "" };
                    let start = doc.line_start(line);
                    let end = doc.line_start(line + 1);
                    let text = doc.text()[start..end].trim_end();
                    println!("{:>5} {:>2} -> {:>2}{:7} | {}", line, level, next, header, text.as_bstr());
                }
            }
        }
    }
}

fn parse_args() -> Result<DlxArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = DlxArgs {
        pass: pargs.opt_value_from_fn("--pass", parse_pass)?.unwrap_or(Pass::Colour),
        quiet: pargs.contains("--quiet"),
        source_file: pargs.free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}

fn parse_pass(s: &str) -> Result<Pass, &'static str> {
    match s {
        "colour" => Ok(Pass::Colour),
        "fold" => Ok(Pass::Fold),
        _ => Err("unrecognized pass name"),
    }
}

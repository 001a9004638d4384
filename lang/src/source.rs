//! Source buffer handling for the command-line front end and the tests.

use std::fs::File;

use mmap_rs;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { bytes: &'a [u8] },
}

/// Keeps source bytes and a buffer name in the same object, so they provide the same
/// lifetimes. The lexer itself never sees a [SourceBuffer]; hosts copy or map the bytes
/// into whatever implements [crate::document::Styler].
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    /// Maps a file into memory. Makes no attempt to validate the contents; the lexer is
    /// byte-oriented and total over arbitrary input.
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'_>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer =
            unsafe { mmap_rs::MmapOptions::new(len.try_into().unwrap())?.with_file(&file, 0).map()? };
        let file_name = file_path.display().to_string();
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> Result<SourceBuffer<'a>, mmap_rs::Error> {
        Ok(SourceBuffer {
            kind: SourceBufferKind::Memory { bytes: string.as_bytes() },
            file_name: String::from(name),
        })
    }

    pub fn code(&self) -> &[u8] {
        match &self.kind {
            SourceBufferKind::File { buffer } => buffer.as_slice(),
            SourceBufferKind::Memory { bytes } => bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}

/// Builds an in-memory [SourceBuffer] from a Dart source literal, named after the call
/// site for recognizable test failures.
#[macro_export]
macro_rules! dart {
    ( $s:literal ) => {
        &$crate::source::SourceBuffer::new_from_string(
            $s,
            const_format::formatcp!("{}:{}:{}", file!(), line!(), column!()),
        )
        .unwrap()
    };
}

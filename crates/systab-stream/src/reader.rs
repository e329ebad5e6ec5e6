// Dweve Systab - Streaming Classification Tables
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Synchronous table reader.
//!
//! Same row semantics as the async reader, pulling chunks from a blocking
//! [`Read`] on demand instead of from a producer task. Since chunks are only
//! read when the caller asks for a row, memory stays bounded by one chunk plus
//! one batch without any queue.

use crate::assembler::LineAssembler;
use crate::config::TableReaderConfig;
use crate::cursor::RowCursor;
use crate::error::{TableError, TableResult};
use crate::row::RowParser;
use crate::source::decode_latin1;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Blocking, iterator-based table reader.
///
/// # Examples
///
/// ## Raw Fields
///
/// ```rust
/// use systab_stream::{RawFields, TableReader};
/// use std::io::Cursor;
///
/// let input = "h1;h2;h3;\r\nv1;v2;v3;\r\n";
/// let mut reader = TableReader::new(Cursor::new(input), RawFields);
///
/// let row = reader.next_row().unwrap().unwrap();
/// assert_eq!(row.fields(), &["v1", "v2", "v3"]);
/// assert!(reader.next_row().unwrap().is_none());
/// ```
///
/// ## Custom Parser
///
/// ```rust
/// use systab_stream::{RawRow, RowParseError, TableReader};
/// use std::io::Cursor;
///
/// let parse = |row: RawRow| -> Result<(String, String), RowParseError> {
///     Ok((row.field(0, "code")?.to_string(), row.field(1, "title")?.trim().to_string()))
/// };
///
/// let input = "code;title;\r\nA00; Cholera ;\r\nA01;Typhus;\r\n";
/// let rows: Vec<_> = TableReader::new(Cursor::new(input), parse)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(rows[0], ("A00".to_string(), "Cholera".to_string()));
/// assert_eq!(rows.len(), 2);
/// ```
pub struct TableReader<R: Read, P> {
    reader: R,
    buffer: Vec<u8>,
    assembler: LineAssembler,
    cursor: RowCursor,
    parser: P,
    /// Failure found while assembling, reported after the rows before it.
    failure: Option<TableError>,
    finished: bool,
}

impl<R: Read, P: RowParser> TableReader<R, P> {
    /// Create a reader with default configuration.
    pub fn new(reader: R, parser: P) -> Self {
        let config = TableReaderConfig::default();
        Self::build(reader, &config, parser)
    }

    /// Create a reader with custom configuration.
    pub fn with_config(reader: R, config: TableReaderConfig, parser: P) -> TableResult<Self> {
        config.validate()?;
        Ok(Self::build(reader, &config, parser))
    }

    fn build(reader: R, config: &TableReaderConfig, parser: P) -> Self {
        Self {
            reader,
            buffer: vec![0; config.chunk_size],
            assembler: LineAssembler::new(config.max_line_length),
            cursor: RowCursor::default(),
            parser,
            failure: None,
            finished: false,
        }
    }

    /// Get the next row, or `Ok(None)` once the table is exhausted.
    pub fn next_row(&mut self) -> TableResult<Option<P::Row>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            if let Some(result) = self.cursor.next_row(&self.parser) {
                if result.is_err() {
                    self.finish();
                }
                return result.map(Some);
            }
            if let Some(err) = self.failure.take() {
                self.finish();
                return Err(err);
            }

            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    if let Some(length) = self.assembler.finish() {
                        warn!(
                            line = self.assembler.lines_emitted() + 1,
                            bytes = length,
                            "discarding unterminated trailing line"
                        );
                    }
                    self.finished = true;
                    return Ok(None);
                }
                Ok(n) => {
                    let chunk = decode_latin1(&self.buffer[..n]);
                    if let Some(batch) = self.assembler.feed(&chunk) {
                        self.cursor.push(batch);
                    }
                    self.failure = self.assembler.take_error();
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    let line = self.assembler.lines_emitted();
                    self.finish();
                    return Err(TableError::Source { line, source: e });
                }
            }
        }
    }

    /// Number of rows handed to the caller so far.
    #[inline]
    pub fn rows_read(&self) -> usize {
        self.cursor.rows_yielded()
    }

    /// Stop early, discarding remaining rows.
    pub fn close(&mut self) {
        self.finish();
    }

    /// Consume the reader, returning the underlying resource.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn finish(&mut self) {
        self.finished = true;
        self.cursor.clear();
        self.assembler.finish();
    }
}

impl<P: RowParser> TableReader<File, P> {
    /// Open a table file.
    pub fn open(path: impl AsRef<Path>, config: TableReaderConfig, parser: P) -> TableResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), chunk_size = config.chunk_size, "opened table");
        Self::with_config(file, config, parser)
    }
}

/// Open a table file for blocking iteration.
pub fn open_sync<P: RowParser>(
    path: impl AsRef<Path>,
    config: TableReaderConfig,
    parser: P,
) -> TableResult<TableReader<File, P>> {
    TableReader::open(path, config, parser)
}

impl<R: Read, P: RowParser> Iterator for TableReader<R, P> {
    type Item = TableResult<P::Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{RawFields, RawRow};
    use crate::test_util::ChunkedReader;
    use std::io::Cursor;

    fn rows(input: &str) -> Vec<Vec<String>> {
        TableReader::new(Cursor::new(input.to_string()), RawFields)
            .map(|r| r.unwrap().into_fields())
            .collect()
    }

    // ==================== Basic reading ====================

    #[test]
    fn test_header_skipped() {
        assert_eq!(
            rows("h1;h2;h3;\r\nv1;v2;v3;\r\n"),
            vec![vec!["v1", "v2", "v3"]]
        );
    }

    #[test]
    fn test_many_rows_keep_order() {
        let mut input = String::from("id;\r\n");
        for i in 0..1000 {
            input.push_str(&format!("{};\r\n", i));
        }
        let result = rows(&input);
        assert_eq!(result.len(), 1000);
        for (i, row) in result.iter().enumerate() {
            assert_eq!(row, &vec![i.to_string()]);
        }
    }

    #[test]
    fn test_row_line_numbers() {
        let reader = TableReader::new(Cursor::new("h;\r\na;\r\nb;\r\n"), RawFields);
        let lines: Vec<usize> = reader.map(|r| r.unwrap().line()).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    // ==================== Edge cases ====================

    #[test]
    fn test_empty_input() {
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_header_only_without_terminator() {
        assert!(rows("h1;h2").is_empty());
    }

    #[test]
    fn test_header_only_with_terminator() {
        assert!(rows("h1;h2;\r\n").is_empty());
    }

    #[test]
    fn test_last_row_without_terminator() {
        assert_eq!(rows("h;\r\na;b;\r\nc;d"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_lf_only_lines_are_one_record() {
        assert!(rows("h\na\nb\n").is_empty());
    }

    #[test]
    fn test_whitespace_preserved() {
        assert_eq!(rows("h;\r\n a ; b ;\r\n"), vec![vec![" a ", " b "]]);
    }

    #[test]
    fn test_latin1_bytes() {
        let bytes: Vec<u8> = b"h;\r\nGr\xf6\xdfe;\r\n".to_vec();
        let rows: Vec<RawRow> = TableReader::new(Cursor::new(bytes), RawFields)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows[0].fields(), &["Größe"]);
    }

    // ==================== Chunking ====================

    #[test]
    fn test_tiny_chunk_size() {
        let config = TableReaderConfig::default().with_chunk_size(1);
        let reader =
            TableReader::with_config(Cursor::new("h1;h2;\r\nv1;v2;\r\n"), config, RawFields).unwrap();
        let rows: Vec<Vec<String>> = reader.map(|r| r.unwrap().into_fields()).collect();
        assert_eq!(rows, vec![vec!["v1", "v2"]]);
    }

    #[test]
    fn test_scripted_chunks() {
        let reader = TableReader::new(ChunkedReader::new(&["h1;h2;", "\r", "\nv1;v2", ";v3;\r\n"]), RawFields);
        let rows: Vec<Vec<String>> = reader.map(|r| r.unwrap().into_fields()).collect();
        assert_eq!(rows, vec![vec!["v1", "v2", "v3"]]);
    }

    // ==================== Errors ====================

    #[test]
    fn test_source_error_after_rows() {
        let input = ChunkedReader::new(&["h1;\r\n", "r1a;r1b;\r\nr2a;r2b"]).fail_with(ErrorKind::Other);
        let mut reader = TableReader::new(input, RawFields);

        assert_eq!(reader.next_row().unwrap().unwrap().fields(), &["r1a", "r1b"]);
        let err = reader.next_row().unwrap_err();
        assert!(matches!(err, TableError::Source { line: 2, .. }));
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let input = ChunkedReader::new(&["h;\r\na;\r\n"]).fail_with(ErrorKind::Other);
        let results: Vec<_> = TableReader::new(input, RawFields).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    /// Rows as field lists, with any error rendered for comparison.
    fn limited(limit: usize, chunks: &[&str]) -> Vec<Result<Vec<String>, String>> {
        let config = TableReaderConfig {
            max_line_length: limit,
            ..Default::default()
        };
        TableReader::with_config(ChunkedReader::new(chunks), config, RawFields)
            .unwrap()
            .map(|r| r.map(RawRow::into_fields).map_err(|e| e.to_string()))
            .collect()
    }

    #[test]
    fn test_long_line_same_for_any_split() {
        let whole = limited(8, &["h;\r\n0123456789;\r\n"]);
        assert_eq!(
            whole,
            vec![Err("Line 2 too long: 10 bytes exceeds limit of 8".to_string())]
        );
        assert_eq!(limited(8, &["h;\r\n0123456789", ";\r\n"]), whole);
        assert_eq!(limited(8, &["h;\r\n01234", "56789;", "\r\n"]), whole);
    }

    #[test]
    fn test_rows_before_long_line_delivered() {
        let results = limited(4, &["h;\r\na;\r\nb;\r\n0123456789;\r\nc;\r\n"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(vec!["a".to_string()]));
        assert_eq!(results[1], Ok(vec!["b".to_string()]));
        assert!(results[2].is_err());
    }

    #[test]
    fn test_long_header_without_terminator_yields_nothing() {
        assert!(limited(8, &["h123456789"]).is_empty());
        assert!(limited(8, &["h1234", "56789"]).is_empty());
    }

    #[test]
    fn test_close_discards_rest() {
        let mut reader = TableReader::new(Cursor::new("h;\r\na;\r\nb;\r\n"), RawFields);
        assert!(reader.next_row().unwrap().is_some());
        reader.close();
        assert!(reader.next_row().unwrap().is_none());
        assert_eq!(reader.rows_read(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let config = TableReaderConfig::default().with_chunk_size(0);
        assert!(TableReader::with_config(Cursor::new(""), config, RawFields).is_err());
    }

    #[test]
    fn test_into_inner() {
        let reader = TableReader::new(Cursor::new("h;\r\n"), RawFields);
        let cursor = reader.into_inner();
        assert_eq!(cursor.position(), 0);
    }
}

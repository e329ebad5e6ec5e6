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

//! Async table reader.
//!
//! [`AsyncTableReader`] is a lazy, finite sequence of parsed rows. Each reader
//! owns its own source, assembler and queue; two readers over the same file
//! share nothing and produce the same rows.
//!
//! # Suspension Points
//!
//! - Waiting for the next batch when none is queued and the source is still open
//! - Between rows: control returns to the caller after every row
//!
//! On a current-thread runtime the producer task and the reader interleave
//! cooperatively and never run at the same time.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use systab_stream::{open, RawFields, TableReaderConfig};
//!
//! let mut reader = open("chapters.txt", TableReaderConfig::default(), RawFields).await?;
//!
//! while let Some(row) = reader.next_row().await? {
//!     println!("{}", row.fields().join(" | "));
//! }
//! # Ok(())
//! # }
//! ```

use crate::assembler::LineAssembler;
use crate::config::TableReaderConfig;
use crate::cursor::RowCursor;
use crate::error::TableResult;
use crate::queue::{RowBatchQueue, Wait};
use crate::row::{RawFields, RowParser};
use crate::source::ByteSource;
use std::path::Path;
use tokio::io::AsyncRead;
use tracing::debug;

/// Lazy async sequence of parsed table rows.
///
/// The first line of the stream is the header and never reaches the parser.
/// A source failure is returned once, after every row completed before the
/// failure; after any error the reader is finished and returns `Ok(None)`.
///
/// Dropping the reader, or calling [`close`](Self::close), stops the source
/// and closes the underlying resource even when rows remain unread.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "async")]
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use systab_stream::{AsyncTableReader, RawFields, TableReaderConfig};
/// use std::io::Cursor;
///
/// let data = b"h1;h2;h3;\r\nv1;v2;v3;\r\n".to_vec();
/// let reader = AsyncTableReader::from_reader(
///     Cursor::new(data),
///     TableReaderConfig::default(),
///     RawFields,
/// )?;
///
/// let rows = reader.collect_rows().await?;
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].fields(), &["v1", "v2", "v3"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AsyncTableReader<P> {
    queue: RowBatchQueue,
    cursor: RowCursor,
    parser: P,
    finished: bool,
}

impl<P: RowParser> AsyncTableReader<P> {
    /// Start reading from any async resource.
    ///
    /// The producer task starts immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`](crate::TableError::InvalidConfig)
    /// for unusable configuration.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn from_reader<R>(reader: R, config: TableReaderConfig, parser: P) -> TableResult<Self>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        config.validate()?;

        let source = ByteSource::new(reader, config.chunk_size);
        let assembler = LineAssembler::new(config.max_line_length);
        let queue = RowBatchQueue::spawn(source, assembler, config.queue_capacity);

        Ok(Self {
            queue,
            cursor: RowCursor::default(),
            parser,
            finished: false,
        })
    }

    /// Open a table file.
    pub async fn open(path: impl AsRef<Path>, config: TableReaderConfig, parser: P) -> TableResult<Self> {
        let path = path.as_ref();
        config.validate()?;
        let file = tokio::fs::File::open(path).await?;
        debug!(path = %path.display(), chunk_size = config.chunk_size, "opened table");
        Self::from_reader(file, config, parser)
    }

    /// Get the next row.
    ///
    /// Returns `Ok(None)` once the table is exhausted.
    pub async fn next_row(&mut self) -> TableResult<Option<P::Row>> {
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

            match self.queue.next_batch().await {
                Wait::Batch(batch) => self.cursor.push(batch),
                Wait::Drained => {
                    self.finished = true;
                    return match self.queue.take_error() {
                        Some(err) => Err(err),
                        None => Ok(None),
                    };
                }
            }
        }
    }

    /// Read every remaining row.
    pub async fn collect_rows(mut self) -> TableResult<Vec<P::Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Number of rows handed to the caller so far.
    #[inline]
    pub fn rows_read(&self) -> usize {
        self.cursor.rows_yielded()
    }

    /// Returns `true` once the reader can produce no more rows.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop early. Remaining rows are discarded and the resource is closed.
    pub fn close(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.finished = true;
        self.cursor.clear();
        self.queue.close();
    }
}

/// Open a table file with a row parser.
///
/// Every call creates an independent reader.
pub async fn open<P: RowParser>(
    path: impl AsRef<Path>,
    config: TableReaderConfig,
    parser: P,
) -> TableResult<AsyncTableReader<P>> {
    AsyncTableReader::open(path, config, parser).await
}

/// Open a table file yielding raw fields with the default configuration.
pub async fn open_raw(path: impl AsRef<Path>) -> TableResult<AsyncTableReader<RawFields>> {
    AsyncTableReader::open(path, TableReaderConfig::default(), RawFields).await
}

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

//! Reassembly of complete lines from arbitrarily split chunks.
//!
//! Chunks arrive with boundaries anywhere, including in the middle of the
//! `;\r\n` terminator. [`LineAssembler`] buffers them and, per chunk, hands out
//! every line that is now known to be complete as one [`RowBatch`].

use crate::error::TableError;
use crate::row::TERMINATOR;

/// Complete, terminator-stripped lines extracted in one assembly step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBatch {
    first_line: usize,
    lines: Vec<String>,
}

impl RowBatch {
    /// Line number of the first line in the batch.
    #[inline]
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Lines in file order.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the batch holds no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pair each line with its line number.
    pub fn into_numbered(self) -> impl Iterator<Item = (usize, String)> {
        let first = self.first_line;
        self.lines
            .into_iter()
            .enumerate()
            .map(move |(offset, line)| (first + offset, line))
    }
}

/// Buffer that turns chunks into batches of complete lines.
///
/// After every [`feed`](Self::feed) the buffer holds no complete terminator;
/// at most one partial line is retained for the next chunk. Text still buffered
/// when the source ends is never emitted as a line.
///
/// Line length is counted in characters of the line content, which for
/// Latin-1 input is the byte length of the source line. A terminated line
/// longer than the limit fails with [`TableError::LineTooLong`], wherever the
/// chunk boundaries fall. Once the partial line is known to exceed the limit
/// its text is dropped and only its length is tracked, so memory stays bounded.
/// An over-long unterminated trailing line is discarded like any other.
///
/// # Examples
///
/// ```rust
/// use systab_stream::LineAssembler;
///
/// let mut assembler = LineAssembler::new(1024);
///
/// let batch = assembler.feed("h1;h2;\r\nv1;v2").unwrap();
/// assert_eq!(batch.lines(), &["h1;h2"]);
///
/// // Terminator split across chunks
/// assert!(assembler.feed(";\r").is_none());
/// let batch = assembler.feed("\n").unwrap();
/// assert_eq!(batch.first_line(), 2);
/// assert_eq!(batch.lines(), &["v1;v2"]);
/// assert!(assembler.take_error().is_none());
/// ```
#[derive(Debug)]
pub struct LineAssembler {
    buffer: String,
    lines_emitted: usize,
    max_line_length: usize,
    /// Characters of an over-long partial line already dropped from `buffer`.
    overflow: Option<usize>,
    error: Option<TableError>,
    failed: bool,
}

impl LineAssembler {
    /// Create an assembler that rejects lines longer than `max_line_length`
    /// characters.
    pub fn new(max_line_length: usize) -> Self {
        Self {
            buffer: String::new(),
            lines_emitted: 0,
            max_line_length,
            overflow: None,
            error: None,
            failed: false,
        }
    }

    /// Number of complete lines handed out so far.
    #[inline]
    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }

    /// Characters currently held as an unterminated line.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.overflow.unwrap_or(0) + self.buffer.chars().count()
    }

    /// Append a chunk and extract every line completed by it.
    ///
    /// Returns `None` when the chunk did not complete any line. If a completed
    /// line is too long, the batch holds only the lines before it and the
    /// failure is parked for [`take_error`](Self::take_error); callers check it
    /// after every feed. A failed assembler ignores further input.
    pub fn feed(&mut self, chunk: &str) -> Option<RowBatch> {
        if self.failed {
            return None;
        }
        self.buffer.push_str(chunk);

        if let Some(dropped) = self.overflow {
            return self.feed_overflow(dropped);
        }

        let mut lines = Vec::new();
        if let Some(pos) = self.buffer.rfind(TERMINATOR) {
            let rest = self.buffer.split_off(pos + TERMINATOR.len());
            let mut complete = std::mem::replace(&mut self.buffer, rest);
            complete.truncate(pos);

            for line in complete.split(TERMINATOR) {
                let length = line.chars().count();
                if length > self.max_line_length {
                    self.fail(self.lines_emitted + lines.len() + 1, length);
                    break;
                }
                lines.push(line.to_string());
            }
        }

        if !self.failed {
            self.check_partial();
        }
        self.batch(lines)
    }

    /// Look for the terminator ending an over-long line whose text was dropped.
    fn feed_overflow(&mut self, dropped: usize) -> Option<RowBatch> {
        match self.buffer.find(TERMINATOR) {
            Some(pos) => {
                let length = dropped + self.buffer[..pos].chars().count();
                self.fail(self.lines_emitted + 1, length);
            }
            None => self.drop_partial(dropped),
        }
        None
    }

    /// Switch to length-only tracking once the partial line is certainly too
    /// long. A trailing `;` or `;\r` may still turn out to be the terminator,
    /// so it is kept as text and not counted yet.
    fn check_partial(&mut self) {
        let pending = self.buffer.chars().count();
        if pending.saturating_sub(terminator_prefix_len(&self.buffer)) > self.max_line_length {
            self.drop_partial(0);
        }
    }

    /// Move all but a possible terminator prefix of the buffer into the
    /// dropped-character count.
    fn drop_partial(&mut self, dropped: usize) {
        let keep = TERMINATOR.len() - 1;
        let split = self
            .buffer
            .char_indices()
            .rev()
            .nth(keep - 1)
            .map_or(0, |(idx, _)| idx);
        let tail = self.buffer.split_off(split);
        let counted = self.buffer.chars().count();
        self.buffer = tail;
        self.overflow = Some(dropped + counted);
    }

    fn fail(&mut self, line: usize, length: usize) {
        self.buffer.clear();
        self.overflow = None;
        self.failed = true;
        self.error = Some(TableError::LineTooLong {
            line,
            length,
            limit: self.max_line_length,
        });
    }

    fn batch(&mut self, lines: Vec<String>) -> Option<RowBatch> {
        if lines.is_empty() {
            return None;
        }
        let batch = RowBatch {
            first_line: self.lines_emitted + 1,
            lines,
        };
        self.lines_emitted += batch.len();
        Some(batch)
    }

    /// Take the failure recorded by the last [`feed`](Self::feed), if any.
    pub fn take_error(&mut self) -> Option<TableError> {
        self.error.take()
    }

    /// Finish assembly, returning the length in characters of any discarded
    /// unterminated trailing text.
    pub fn finish(&mut self) -> Option<usize> {
        let pending = self.pending_len();
        self.buffer.clear();
        self.overflow = None;
        if pending == 0 {
            None
        } else {
            Some(pending)
        }
    }
}

/// Length of the longest suffix of `text` that is a proper prefix of the
/// terminator.
fn terminator_prefix_len(text: &str) -> usize {
    (1..TERMINATOR.len())
        .rev()
        .find(|&n| text.ends_with(&TERMINATOR[..n]))
        .unwrap_or(0)
}

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

//! Per-reader walk over assembled lines: header skip and row parsing.

use crate::assembler::RowBatch;
use crate::error::{TableError, TableResult};
use crate::row::{RawRow, RowParser};
use std::collections::VecDeque;
use tracing::trace;

/// Lines received but not yet handed to the caller.
#[derive(Debug, Default)]
pub(crate) struct RowCursor {
    pending: VecDeque<(usize, String)>,
    header_skipped: bool,
    rows_yielded: usize,
}

impl RowCursor {
    pub(crate) fn push(&mut self, batch: RowBatch) {
        self.pending.extend(batch.into_numbered());
    }

    #[inline]
    pub(crate) fn rows_yielded(&self) -> usize {
        self.rows_yielded
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    /// Parse the next pending data line, or `None` if a new batch is needed.
    ///
    /// The first line ever seen by this cursor is the table header and is
    /// dropped without reaching the parser.
    pub(crate) fn next_row<P: RowParser>(&mut self, parser: &P) -> Option<TableResult<P::Row>> {
        while let Some((line, text)) = self.pending.pop_front() {
            if !self.header_skipped {
                self.header_skipped = true;
                trace!(line, "skipping header line");
                continue;
            }

            let result = match parser.parse_row(RawRow::from_line(line, &text)) {
                Ok(row) => {
                    self.rows_yielded += 1;
                    Ok(row)
                }
                Err(source) => Err(TableError::parse(line, source)),
            };
            return Some(result);
        }
        None
    }
}

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

//! Reader configuration.

use crate::error::{TableError, TableResult};

/// Configuration for table readers.
///
/// # Examples
///
/// ```rust
/// use systab_stream::TableReaderConfig;
///
/// let config = TableReaderConfig {
///     chunk_size: 4096,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReaderConfig {
    /// Number of bytes requested from the source per read.
    ///
    /// This is a hint; a source may deliver fewer bytes per chunk.
    ///
    /// Default: 64KB
    pub chunk_size: usize,

    /// Maximum number of line batches buffered between the source and the
    /// consumer.
    ///
    /// When the queue is full the source stops reading until the consumer
    /// catches up, which bounds memory for slow consumers.
    ///
    /// Default: 16 batches
    pub queue_capacity: usize,

    /// Maximum length of a line in bytes, terminator excluded.
    ///
    /// A longer terminated line fails with `LineTooLong`. A longer partial
    /// line is tracked by length only, so a file without terminators is never
    /// buffered whole.
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
            queue_capacity: 16,
            max_line_length: 1_000_000,
        }
    }
}

impl TableReaderConfig {
    /// Check that every limit is usable.
    pub fn validate(&self) -> TableResult<()> {
        if self.chunk_size == 0 {
            return Err(TableError::InvalidConfig(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(TableError::InvalidConfig(
                "queue_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_line_length == 0 {
            return Err(TableError::InvalidConfig(
                "max_line_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style override of the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builder-style override of the queue capacity.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }
}

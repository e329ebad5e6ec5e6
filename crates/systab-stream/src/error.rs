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

//! Error types for the table reader.
//!
//! # Error Categories
//!
//! - **Open Errors**: The table file could not be opened
//! - **Source Errors**: Reading the underlying resource failed mid-stream
//! - **Row Errors**: The row parser rejected a line
//! - **Limit Errors**: A line grew past the configured maximum length
//!
//! A source error is terminal. It is reported exactly once, after every row
//! that was complete before the failure has been yielded.
//!
//! # Example
//!
//! ```rust
//! use systab_stream::{RawFields, TableError, TableReader};
//! use std::io::Cursor;
//!
//! let input = "h1;h2;\r\nv1;v2;\r\n";
//! let reader = TableReader::new(Cursor::new(input), RawFields);
//!
//! for row in reader {
//!     match row {
//!         Ok(row) => println!("{:?}", row.fields()),
//!         Err(TableError::Parse { line, source }) => {
//!             eprintln!("line {}: {}", line, source);
//!             break;
//!         }
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur while reading a table.
#[derive(Error, Debug)]
pub enum TableError {
    /// The table could not be opened.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the underlying resource failed after `line` complete lines.
    #[error("Source error after line {line}: {source}")]
    Source {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A terminated line exceeded the configured maximum length.
    #[error("Line {line} too long: {length} bytes exceeds limit of {limit}")]
    LineTooLong {
        line: usize,
        length: usize,
        limit: usize,
    },

    /// The row parser rejected a line.
    #[error("Row error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: RowParseError,
    },

    /// Reader configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TableError {
    /// Create a row parse error.
    #[inline]
    pub fn parse(line: usize, source: RowParseError) -> Self {
        Self::Parse { line, source }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Source { line, .. }
            | Self::LineTooLong { line, .. }
            | Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` for failures of the underlying resource.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Source { .. })
    }
}

/// Errors raised by a [`RowParser`](crate::RowParser) while converting a row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowParseError {
    /// A required field is absent.
    #[error("missing field {index} ({name})")]
    MissingField { index: usize, name: &'static str },

    /// A field is present but its content is unusable.
    #[error("invalid field {index}: {message}")]
    Invalid { index: usize, message: String },

    /// Any other parser-defined failure.
    #[error("{0}")]
    Custom(String),
}

impl RowParseError {
    /// Create an invalid field error.
    #[inline]
    pub fn invalid(index: usize, message: impl Into<String>) -> Self {
        Self::Invalid {
            index,
            message: message.into(),
        }
    }

    /// Create a parser-defined error.
    #[inline]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Result type for table reading operations.
pub type TableResult<T> = Result<T, TableError>;

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

//! Streaming Table Reader
//!
//! This crate turns an arbitrarily chunked byte stream of a semicolon-delimited
//! classification table into a lazy sequence of rows. Each record line ends with
//! the three-character terminator `;\r\n`; fields are separated by a bare `;`
//! with no quoting or escaping. Files are Latin-1 encoded.
//!
//! # Features
//!
//! - **Chunk Independent**: The same file yields the same rows however reads split it,
//!   including terminators split across reads
//! - **Header Skip**: The first line of every table names its columns and is dropped
//! - **Pluggable Rows**: A [`RowParser`] turns each [`RawRow`] into an application type
//! - **Bounded Memory**: The async producer pauses reading while the queue is full
//! - **Single Error Report**: A source failure surfaces once, after every row completed
//!   before it
//!
//! A line that never receives its terminator, including a last line at end of
//! file, is not a record and is silently dropped.
//!
//! # Sync vs Async
//!
//! ## Synchronous API
//!
//! ```rust,no_run
//! use systab_stream::{open_sync, RawFields, TableReaderConfig};
//!
//! let reader = open_sync("categories.txt", TableReaderConfig::default(), RawFields).unwrap();
//!
//! for row in reader {
//!     match row {
//!         Ok(row) => println!("{}", row.fields().join(" | ")),
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! ## Asynchronous API (feature = "async", default)
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use systab_stream::open_raw;
//!
//! let mut reader = open_raw("categories.txt").await?;
//!
//! while let Some(row) = reader.next_row().await? {
//!     println!("{}", row.fields().join(" | "));
//! }
//! # Ok(())
//! # }
//! ```

mod assembler;
mod config;
mod cursor;
mod error;
mod reader;
mod row;
mod source;

#[cfg(feature = "async")]
mod queue;
#[cfg(feature = "async")]
mod table;

#[cfg(test)]
pub(crate) mod test_util;

pub use assembler::{LineAssembler, RowBatch};
pub use config::TableReaderConfig;
pub use error::{RowParseError, TableError, TableResult};
pub use reader::{open_sync, TableReader};
pub use row::{RawFields, RawRow, RowParser, FIELD_SEPARATOR, TERMINATOR};
pub use source::decode_latin1;

#[cfg(feature = "async")]
pub use source::ByteSource;
#[cfg(feature = "async")]
pub use table::{open, open_raw, AsyncTableReader};

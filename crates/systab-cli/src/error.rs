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

//! Structured error types for the systab CLI.

use std::io;
use std::path::PathBuf;
use systab_stream::TableError;
use thiserror::Error;

/// Errors raised while running a CLI command.
///
/// # Examples
///
/// ```rust,no_run
/// use systab_cli::error::CliError;
/// use systab_stream::TableReaderConfig;
///
/// fn check(config: &TableReaderConfig) -> Result<(), CliError> {
///     config.validate().map_err(|e| CliError::table("<config>", e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// The table could not be opened or read.
    #[error("failed to read table '{path}': {source}")]
    Table {
        /// The table file
        path: PathBuf,
        #[source]
        source: TableError,
    },

    /// Writing rows to the output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),

    /// A row could not be rendered as JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Attach the table path to a reader error.
    pub fn table(path: impl Into<PathBuf>, source: TableError) -> Self {
        Self::Table {
            path: path.into(),
            source,
        }
    }

    /// True when the output pipe was closed by the consumer (e.g. `| head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, CliError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

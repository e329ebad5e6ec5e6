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

//! Count command - number of data rows in a table file

use crate::error::CliError;
use std::path::Path;
use systab_stream::{open, RawFields, TableReaderConfig};
use tracing::info;

/// Count the data rows of `file` and print the total.
///
/// The header line is not counted. Rows are not parsed beyond splitting
/// into fields, so any well-terminated table can be counted.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or a read fails partway.
pub async fn count(file: &Path, config: TableReaderConfig) -> Result<(), CliError> {
    let total = count_rows(file, config).await?;
    println!("{}", total);
    info!(file = %file.display(), rows = total, "rows counted");
    Ok(())
}

async fn count_rows(file: &Path, config: TableReaderConfig) -> Result<usize, CliError> {
    let mut reader = open(file, config, RawFields)
        .await
        .map_err(|e| CliError::table(file, e))?;

    while reader
        .next_row()
        .await
        .map_err(|e| CliError::table(file, e))?
        .is_some()
    {}
    Ok(reader.rows_read())
}

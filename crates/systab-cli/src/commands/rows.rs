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

//! Rows command - print the data rows of a table file

use super::{emit_rows, raw_json, raw_text, stdout, typed_json, typed_text};
use crate::error::CliError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use systab_stream::{open, RawFields, RawRow, RowParseError, TableReaderConfig};
use systab_tables::{
    parse_category, parse_chapter, parse_group, parse_morphology_category,
    parse_morphology_group, parse_subcategory, TableKind,
};
use tracing::info;

/// How rows are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `;`-separated line per row
    Text,
    /// One JSON object per line
    Json,
}

/// Print the rows of `file`.
///
/// With `table` unset every row is printed as raw fields; otherwise each row
/// is parsed as that table and a malformed row stops the command with an
/// error naming its line. `limit` stops after that many rows and closes the
/// reader early.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or read, a row fails to
/// parse, or stdout cannot be written.
///
/// # Examples
///
/// ```no_run
/// use systab_cli::commands::{rows, OutputFormat};
/// use systab_stream::TableReaderConfig;
/// use systab_tables::TableKind;
///
/// # async fn example() -> Result<(), systab_cli::error::CliError> {
/// let file = std::path::Path::new("chapters.txt");
/// rows(file, Some(TableKind::Chapter), OutputFormat::Json, Some(5), TableReaderConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn rows(
    file: &Path,
    table: Option<TableKind>,
    format: OutputFormat,
    limit: Option<usize>,
    config: TableReaderConfig,
) -> Result<(), CliError> {
    let mut out = stdout();
    let written = write_rows(file, table, format, limit, config, &mut out).await?;
    info!(
        file = %file.display(),
        table = table.map_or("raw", TableKind::name),
        rows = written,
        "rows printed"
    );
    Ok(())
}

async fn write_rows<W: Write>(
    file: &Path,
    table: Option<TableKind>,
    format: OutputFormat,
    limit: Option<usize>,
    config: TableReaderConfig,
    out: &mut W,
) -> Result<usize, CliError> {
    let Some(kind) = table else {
        let reader = open(file, config, RawFields)
            .await
            .map_err(|e| CliError::table(file, e))?;
        return emit_rows(file, reader, limit, out, |row: RawRow| match format {
            OutputFormat::Text => Ok(raw_text(&row)),
            OutputFormat::Json => raw_json(&row),
        })
        .await;
    };

    match kind {
        TableKind::Chapter => write_typed(file, parse_chapter, format, limit, config, out).await,
        TableKind::Group => write_typed(file, parse_group, format, limit, config, out).await,
        TableKind::Category => write_typed(file, parse_category, format, limit, config, out).await,
        TableKind::Subcategory => {
            write_typed(file, parse_subcategory, format, limit, config, out).await
        }
        TableKind::MorphologyGroup => {
            write_typed(file, parse_morphology_group, format, limit, config, out).await
        }
        TableKind::MorphologyCategory => {
            write_typed(file, parse_morphology_category, format, limit, config, out).await
        }
    }
}

async fn write_typed<T, W>(
    file: &Path,
    parse: fn(RawRow) -> Result<T, RowParseError>,
    format: OutputFormat,
    limit: Option<usize>,
    config: TableReaderConfig,
    out: &mut W,
) -> Result<usize, CliError>
where
    T: Serialize,
    W: Write,
{
    let reader = open(file, config, parse)
        .await
        .map_err(|e| CliError::table(file, e))?;
    emit_rows(file, reader, limit, out, |row: T| match format {
        OutputFormat::Text => typed_text(&row),
        OutputFormat::Json => typed_json(&row),
    })
    .await
}

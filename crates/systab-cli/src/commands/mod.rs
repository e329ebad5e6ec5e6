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

//! CLI command implementations

mod count;
mod rows;

pub use count::count;
pub use rows::{rows, OutputFormat};

use crate::error::CliError;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use systab_stream::{AsyncTableReader, RawRow, RowParser, FIELD_SEPARATOR};
use tracing::debug;

/// Buffered, locked stdout shared by the row-printing commands.
pub(crate) fn stdout() -> BufWriter<io::StdoutLock<'static>> {
    BufWriter::new(io::stdout().lock())
}

/// Drain `reader`, writing one rendered line per row.
///
/// Stops after `limit` rows and closes the reader, which stops the
/// producer before the rest of the file is read. Returns the number of
/// rows written.
pub(crate) async fn emit_rows<P, W, F>(
    path: &Path,
    mut reader: AsyncTableReader<P>,
    limit: Option<usize>,
    out: &mut W,
    mut render: F,
) -> Result<usize, CliError>
where
    P: RowParser,
    W: Write,
    F: FnMut(P::Row) -> Result<String, CliError>,
{
    let mut written = 0;
    while limit.map_or(true, |max| written < max) {
        let row = match reader.next_row().await {
            Ok(Some(row)) => row,
            Ok(None) => break,
            Err(e) => return Err(CliError::table(path, e)),
        };
        writeln!(out, "{}", render(row)?)?;
        written += 1;
    }

    if !reader.is_finished() {
        debug!(rows = written, "row limit reached, closing reader");
        reader.close();
    }
    out.flush()?;
    Ok(written)
}

/// Text form of a raw row: the fields joined by the table separator.
pub(crate) fn raw_text(row: &RawRow) -> String {
    join_fields(row.iter())
}

/// JSON form of a raw row, including its line number.
pub(crate) fn raw_json(row: &RawRow) -> Result<String, CliError> {
    let value = serde_json::json!({
        "line": row.line(),
        "fields": row.fields(),
    });
    Ok(serde_json::to_string(&value)?)
}

/// Text form of a typed row: its serialized values in declaration order,
/// joined by the table separator. List values are comma-joined.
pub(crate) fn typed_text<T: Serialize>(row: &T) -> Result<String, CliError> {
    let text = match serde_json::to_value(row)? {
        Value::Object(map) => join_fields(map.values().map(value_text)),
        other => value_text(&other),
    };
    Ok(text)
}

/// JSON Lines form of a typed row.
pub(crate) fn typed_json<T: Serialize>(row: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string(row)?)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn join_fields<S: AsRef<str>>(fields: impl Iterator<Item = S>) -> String {
    let mut line = String::new();
    for (i, field) in fields.enumerate() {
        if i > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(field.as_ref());
    }
    line
}

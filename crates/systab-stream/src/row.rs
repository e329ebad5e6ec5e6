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

//! Raw rows and the row parser contract.
//!
//! A [`RawRow`] is one data line split on the bare `;` separator. The reader
//! never looks inside the fields; turning them into something meaningful is the
//! job of a [`RowParser`] supplied by the caller.

use crate::error::RowParseError;

/// Field separator inside a record line. No quoting or escaping exists.
pub const FIELD_SEPARATOR: char = ';';

/// Sequence that ends every physical record line.
pub const TERMINATOR: &str = ";\r\n";

/// One data line split into its fields.
///
/// Fields keep any leading or trailing whitespace exactly as it appears in the
/// file.
///
/// # Examples
///
/// ```rust
/// use systab_stream::RawRow;
///
/// let row = RawRow::from_line(2, "A00; Cholera ;CHOL");
/// assert_eq!(row.line(), 2);
/// assert_eq!(row.len(), 3);
/// assert_eq!(row.get(1), Some(" Cholera "));
/// assert_eq!(row.get(3), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: usize,
    fields: Vec<String>,
}

impl RawRow {
    /// Create a row from already split fields.
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Split a terminator-stripped line on the field separator.
    pub fn from_line(line: usize, text: &str) -> Self {
        Self {
            line,
            fields: text.split(FIELD_SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// Physical line number in the table file. The header is line 1.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Get a required field, naming it in the error when it is missing.
    pub fn field(&self, index: usize, name: &'static str) -> Result<&str, RowParseError> {
        self.get(index)
            .ok_or(RowParseError::MissingField { index, name })
    }

    /// All fields in file order.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Iterate over the fields.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Consume the row, returning its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

/// Converts one [`RawRow`] into an application row.
///
/// Implementations must be pure functions of their input. Any error ends the
/// sequence at that row; rows yielded earlier stay valid.
///
/// Closures of the form `Fn(RawRow) -> Result<T, RowParseError>` implement this
/// trait directly.
///
/// # Examples
///
/// ```rust
/// use systab_stream::{RawRow, RowParseError, RowParser};
///
/// let codes = |row: RawRow| -> Result<String, RowParseError> {
///     Ok(row.field(0, "code")?.trim().to_string())
/// };
///
/// let row = RawRow::from_line(2, " A00 ;Cholera");
/// assert_eq!(codes.parse_row(row).unwrap(), "A00");
/// ```
pub trait RowParser {
    /// The application row produced for each data line.
    type Row;

    /// Convert one data line.
    fn parse_row(&self, row: RawRow) -> Result<Self::Row, RowParseError>;
}

impl<T, F> RowParser for F
where
    F: Fn(RawRow) -> Result<T, RowParseError>,
{
    type Row = T;

    #[inline]
    fn parse_row(&self, row: RawRow) -> Result<T, RowParseError> {
        self(row)
    }
}

/// The default parser: returns the raw fields unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFields;

impl RowParser for RawFields {
    type Row = RawRow;

    #[inline]
    fn parse_row(&self, row: RawRow) -> Result<RawRow, RowParseError> {
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_line_splits_on_separator() {
        let row = RawRow::from_line(2, "v1;v2;v3");
        assert_eq!(row.fields(), &["v1", "v2", "v3"]);
        assert_eq!(row.line(), 2);
    }

    #[test]
    fn test_from_line_keeps_whitespace_and_empty_fields() {
        let row = RawRow::from_line(5, " a ;;\tb");
        assert_eq!(row.fields(), &[" a ", "", "\tb"]);
    }

    #[test]
    fn test_empty_line_is_single_empty_field() {
        let row = RawRow::from_line(3, "");
        assert_eq!(row.len(), 1);
        assert_eq!(row.get(0), Some(""));
    }

    #[test]
    fn test_field_missing() {
        let row = RawRow::from_line(9, "only");
        assert_eq!(row.field(0, "code"), Ok("only"));
        assert_eq!(
            row.field(2, "description"),
            Err(RowParseError::MissingField {
                index: 2,
                name: "description"
            })
        );
    }

    #[test]
    fn test_raw_fields_is_identity() {
        let row = RawRow::from_line(2, "x;y");
        assert_eq!(RawFields.parse_row(row.clone()), Ok(row));
    }

    #[test]
    fn test_closure_parser() {
        let count = |row: RawRow| -> Result<usize, RowParseError> { Ok(row.len()) };
        assert_eq!(count.parse_row(RawRow::from_line(2, "a;b;c")), Ok(3));
    }

    #[test]
    fn test_into_fields_and_iter() {
        let row = RawRow::new(4, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row.into_fields(), vec!["a".to_string(), "b".to_string()]);
    }
}

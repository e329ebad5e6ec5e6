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

//! Chapter and group tables.

use crate::cleanup::strip_roman_prefix;
use serde::Serialize;
use systab_stream::{RawRow, RowParseError};

/// Field positions in a chapter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterFields {
    pub number: usize,
    pub first_code: usize,
    pub last_code: usize,
    pub description: usize,
    pub abbreviation: usize,
}

/// Chapter table layout.
pub const CHAPTER_FIELDS: ChapterFields = ChapterFields {
    number: 0,
    first_code: 1,
    last_code: 2,
    description: 3,
    abbreviation: 4,
};

/// One chapter: a named range of category codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub number: String,
    pub first_code: String,
    pub last_code: String,
    /// Title without its roman-numeral prefix.
    pub description: String,
    pub abbreviation: String,
}

/// Parse a chapter row.
///
/// # Examples
///
/// ```rust
/// use systab_stream::RawRow;
/// use systab_tables::parse_chapter;
///
/// let row = RawRow::from_line(2, "01;A00;B99;I. Certain infectious diseases;Infections");
/// let chapter = parse_chapter(row).unwrap();
/// assert_eq!(chapter.description, "Certain infectious diseases");
/// assert_eq!(chapter.last_code, "B99");
/// ```
pub fn parse_chapter(row: RawRow) -> Result<Chapter, RowParseError> {
    let f = CHAPTER_FIELDS;
    Ok(Chapter {
        number: row.field(f.number, "number")?.trim().to_string(),
        first_code: row.field(f.first_code, "first_code")?.trim().to_string(),
        last_code: row.field(f.last_code, "last_code")?.trim().to_string(),
        description: strip_roman_prefix(row.field(f.description, "description")?).to_string(),
        abbreviation: row.field(f.abbreviation, "abbreviation")?.trim().to_string(),
    })
}

/// Field positions in a group row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupFields {
    pub first_code: usize,
    pub last_code: usize,
    pub chapter: usize,
    pub description: usize,
    pub abbreviation: usize,
}

/// Group table layout.
pub const GROUP_FIELDS: GroupFields = GroupFields {
    first_code: 0,
    last_code: 1,
    chapter: 2,
    description: 3,
    abbreviation: 4,
};

/// A block of categories inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub first_code: String,
    pub last_code: String,
    pub chapter: String,
    pub description: String,
    pub abbreviation: String,
}

/// Parse a group row.
pub fn parse_group(row: RawRow) -> Result<Group, RowParseError> {
    let f = GROUP_FIELDS;
    Ok(Group {
        first_code: row.field(f.first_code, "first_code")?.trim().to_string(),
        last_code: row.field(f.last_code, "last_code")?.trim().to_string(),
        chapter: row.field(f.chapter, "chapter")?.trim().to_string(),
        description: row.field(f.description, "description")?.trim().to_string(),
        abbreviation: row.field(f.abbreviation, "abbreviation")?.trim().to_string(),
    })
}

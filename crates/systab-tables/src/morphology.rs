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

//! Morphology (neoplasm histology) tables.

use crate::cleanup::strip_code_prefix;
use serde::Serialize;
use systab_stream::{RawRow, RowParseError};

/// Width of the `"M800-M800 "` range prefix in a morphology group description.
pub const MORPHOLOGY_GROUP_PREFIX_WIDTH: usize = 10;

/// Width of the `"M8000/0 "` code prefix in a morphology category description.
pub const MORPHOLOGY_CATEGORY_PREFIX_WIDTH: usize = 8;

/// Field positions in a morphology group row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyGroupFields {
    pub first_code: usize,
    pub last_code: usize,
    pub description: usize,
}

/// Morphology group table layout.
pub const MORPHOLOGY_GROUP_FIELDS: MorphologyGroupFields = MorphologyGroupFields {
    first_code: 0,
    last_code: 1,
    description: 2,
};

/// A range of morphology codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphologyGroup {
    pub first_code: String,
    pub last_code: String,
    pub description: String,
}

/// Parse a morphology group row.
pub fn parse_morphology_group(row: RawRow) -> Result<MorphologyGroup, RowParseError> {
    let f = MORPHOLOGY_GROUP_FIELDS;
    let description = row.field(f.description, "description")?;
    Ok(MorphologyGroup {
        first_code: row.field(f.first_code, "first_code")?.trim().to_string(),
        last_code: row.field(f.last_code, "last_code")?.trim().to_string(),
        description: strip_code_prefix(description, MORPHOLOGY_GROUP_PREFIX_WIDTH).to_string(),
    })
}

/// Field positions in a morphology category row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyCategoryFields {
    pub code: usize,
    pub description: usize,
}

/// Morphology category table layout.
pub const MORPHOLOGY_CATEGORY_FIELDS: MorphologyCategoryFields = MorphologyCategoryFields {
    code: 0,
    description: 1,
};

/// One morphology code with behavior suffix, e.g. `M8140/3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphologyCategory {
    pub code: String,
    pub description: String,
}

/// Parse a morphology category row.
///
/// # Examples
///
/// ```rust
/// use systab_stream::RawRow;
/// use systab_tables::parse_morphology_category;
///
/// let row = RawRow::from_line(2, "M8140/3;M8140/3 Adenocarcinoma, NOS");
/// let entry = parse_morphology_category(row).unwrap();
/// assert_eq!(entry.code, "M8140/3");
/// assert_eq!(entry.description, "Adenocarcinoma, NOS");
/// ```
pub fn parse_morphology_category(row: RawRow) -> Result<MorphologyCategory, RowParseError> {
    let f = MORPHOLOGY_CATEGORY_FIELDS;
    let description = row.field(f.description, "description")?;
    Ok(MorphologyCategory {
        code: row.field(f.code, "code")?.trim().to_string(),
        description: strip_code_prefix(description, MORPHOLOGY_CATEGORY_PREFIX_WIDTH).to_string(),
    })
}

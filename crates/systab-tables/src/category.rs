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

//! Category and subcategory tables.
//!
//! Both tables share one layout. The abbreviation column repeats the code in
//! front of the short title, so the code is cut off at a fixed width: four
//! characters for three-character categories (`"A00 "`), six for subcategories
//! (`"A00.0 "`).

use crate::cleanup::{non_empty, split_code_list, strip_code_prefix};
use serde::Serialize;
use systab_stream::{RawRow, RowParseError};

/// Width of the code prefix in a category abbreviation.
pub const CATEGORY_PREFIX_WIDTH: usize = 4;

/// Width of the code prefix in a subcategory abbreviation.
pub const SUBCATEGORY_PREFIX_WIDTH: usize = 6;

/// Field positions in a category or subcategory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFields {
    pub code: usize,
    pub dual_marker: usize,
    pub description: usize,
    pub abbreviation: usize,
    pub cross_reference: usize,
    pub excluded: usize,
}

/// Category and subcategory layout.
pub const CATEGORY_FIELDS: CategoryFields = CategoryFields {
    code: 0,
    dual_marker: 1,
    description: 2,
    abbreviation: 3,
    cross_reference: 4,
    excluded: 5,
};

/// Dual-classification role of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DualMarker {
    /// Not part of a dual classification.
    None,
    /// Etiology code (`+`).
    Etiology,
    /// Manifestation code (`*`).
    Manifestation,
    /// Optional additional code (`!`).
    Optional,
}

impl DualMarker {
    /// Parse the marker column.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "" => Some(Self::None),
            "+" => Some(Self::Etiology),
            "*" => Some(Self::Manifestation),
            "!" => Some(Self::Optional),
            _ => None,
        }
    }

    /// The marker character as written in the table.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Etiology => "+",
            Self::Manifestation => "*",
            Self::Optional => "!",
        }
    }
}

/// One category or subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub code: String,
    pub dual_marker: DualMarker,
    pub description: String,
    /// Short title without the leading code.
    pub abbreviation: String,
    /// Code referenced by a dual-classification pair, if any.
    pub cross_reference: Option<String>,
    /// Codes excluded from this entry.
    pub excluded: Vec<String>,
}

/// Subcategories use the category layout.
pub type Subcategory = Category;

/// Parse a category row.
///
/// # Examples
///
/// ```rust
/// use systab_stream::RawRow;
/// use systab_tables::{parse_category, DualMarker};
///
/// let row = RawRow::from_line(2, "A17;+;Tuberculosis of nervous system;A17 TB nervous system;G01;A15, A16");
/// let category = parse_category(row).unwrap();
/// assert_eq!(category.dual_marker, DualMarker::Etiology);
/// assert_eq!(category.abbreviation, "TB nervous system");
/// assert_eq!(category.cross_reference.as_deref(), Some("G01"));
/// assert_eq!(category.excluded, vec!["A15", "A16"]);
/// ```
pub fn parse_category(row: RawRow) -> Result<Category, RowParseError> {
    parse_entry(row, CATEGORY_PREFIX_WIDTH)
}

/// Parse a subcategory row.
pub fn parse_subcategory(row: RawRow) -> Result<Subcategory, RowParseError> {
    parse_entry(row, SUBCATEGORY_PREFIX_WIDTH)
}

fn parse_entry(row: RawRow, prefix_width: usize) -> Result<Category, RowParseError> {
    let f = CATEGORY_FIELDS;

    let marker = row.field(f.dual_marker, "dual_marker")?;
    let dual_marker = DualMarker::parse(marker).ok_or_else(|| {
        RowParseError::invalid(
            f.dual_marker,
            format!("unknown dual-classification marker '{}'", marker.trim()),
        )
    })?;

    Ok(Category {
        code: row.field(f.code, "code")?.trim().to_string(),
        dual_marker,
        description: row.field(f.description, "description")?.trim().to_string(),
        abbreviation: strip_code_prefix(row.field(f.abbreviation, "abbreviation")?, prefix_width)
            .to_string(),
        cross_reference: non_empty(row.get(f.cross_reference)),
        excluded: row.get(f.excluded).map(split_code_list).unwrap_or_default(),
    })
}

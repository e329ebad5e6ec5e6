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

//! Per-table entry points.

use crate::category::{parse_category, parse_subcategory, Category, Subcategory};
use crate::chapter::{parse_chapter, parse_group, Chapter, Group};
use crate::morphology::{
    parse_morphology_category, parse_morphology_group, MorphologyCategory, MorphologyGroup,
};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use systab_stream::{open, AsyncTableReader, RawRow, RowParseError, TableReaderConfig, TableResult};

/// Row conversion function for one table.
pub type ParseFn<T> = fn(RawRow) -> Result<T, RowParseError>;

/// Async reader yielding rows of one table type.
pub type TableRows<T> = AsyncTableReader<ParseFn<T>>;

async fn read_with<T>(path: &Path, parse: ParseFn<T>) -> TableResult<TableRows<T>> {
    open(path, TableReaderConfig::default(), parse).await
}

/// Read the chapter table.
pub async fn read_chapters(path: impl AsRef<Path>) -> TableResult<TableRows<Chapter>> {
    read_with(path.as_ref(), parse_chapter).await
}

/// Read the group table.
pub async fn read_groups(path: impl AsRef<Path>) -> TableResult<TableRows<Group>> {
    read_with(path.as_ref(), parse_group).await
}

/// Read the category table.
pub async fn read_categories(path: impl AsRef<Path>) -> TableResult<TableRows<Category>> {
    read_with(path.as_ref(), parse_category).await
}

/// Read the subcategory table.
pub async fn read_subcategories(path: impl AsRef<Path>) -> TableResult<TableRows<Subcategory>> {
    read_with(path.as_ref(), parse_subcategory).await
}

/// Read the morphology group table.
pub async fn read_morphology_groups(
    path: impl AsRef<Path>,
) -> TableResult<TableRows<MorphologyGroup>> {
    read_with(path.as_ref(), parse_morphology_group).await
}

/// Read the morphology category table.
pub async fn read_morphology_categories(
    path: impl AsRef<Path>,
) -> TableResult<TableRows<MorphologyCategory>> {
    read_with(path.as_ref(), parse_morphology_category).await
}

/// The known table variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Chapter,
    Group,
    Category,
    Subcategory,
    MorphologyGroup,
    MorphologyCategory,
}

impl TableKind {
    /// All variants in classification order.
    pub const ALL: [TableKind; 6] = [
        TableKind::Chapter,
        TableKind::Group,
        TableKind::Category,
        TableKind::Subcategory,
        TableKind::MorphologyGroup,
        TableKind::MorphologyCategory,
    ];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Chapter => "chapter",
            TableKind::Group => "group",
            TableKind::Category => "category",
            TableKind::Subcategory => "subcategory",
            TableKind::MorphologyGroup => "morphology-group",
            TableKind::MorphologyCategory => "morphology-category",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown table '{}'", s))
    }
}

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

//! Classification Table Rows
//!
//! Row parsers for the systematic classification tables read with
//! [`systab_stream`]. Each table has a fixed field layout (`*_FIELDS`) and a
//! pure `parse_*` function turning a [`RawRow`](systab_stream::RawRow) into a
//! typed row. The `read_*` functions open a table file with the matching parser.
//!
//! | Table               | Parser                          | Row                   |
//! |---------------------|---------------------------------|-----------------------|
//! | chapter             | [`parse_chapter`]               | [`Chapter`]           |
//! | group               | [`parse_group`]                 | [`Group`]             |
//! | category            | [`parse_category`]              | [`Category`]          |
//! | subcategory         | [`parse_subcategory`]           | [`Subcategory`]       |
//! | morphology group    | [`parse_morphology_group`]      | [`MorphologyGroup`]   |
//! | morphology category | [`parse_morphology_category`]   | [`MorphologyCategory`]|
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use systab_tables::read_chapters;
//!
//! let mut chapters = read_chapters("chapters.txt").await?;
//! while let Some(chapter) = chapters.next_row().await? {
//!     println!("{} {}-{} {}", chapter.number, chapter.first_code, chapter.last_code, chapter.description);
//! }
//! # Ok(())
//! # }
//! ```

mod category;
mod chapter;
mod cleanup;
mod morphology;
mod read;

pub use category::{
    parse_category, parse_subcategory, Category, CategoryFields, DualMarker, Subcategory,
    CATEGORY_FIELDS, CATEGORY_PREFIX_WIDTH, SUBCATEGORY_PREFIX_WIDTH,
};
pub use chapter::{
    parse_chapter, parse_group, Chapter, ChapterFields, Group, GroupFields, CHAPTER_FIELDS,
    GROUP_FIELDS,
};
pub use cleanup::{split_code_list, strip_code_prefix, strip_roman_prefix};
pub use morphology::{
    parse_morphology_category, parse_morphology_group, MorphologyCategory,
    MorphologyCategoryFields, MorphologyGroup, MorphologyGroupFields,
    MORPHOLOGY_CATEGORY_FIELDS, MORPHOLOGY_CATEGORY_PREFIX_WIDTH, MORPHOLOGY_GROUP_FIELDS,
    MORPHOLOGY_GROUP_PREFIX_WIDTH,
};
pub use read::{
    read_categories, read_chapters, read_groups, read_morphology_categories,
    read_morphology_groups, read_subcategories, ParseFn, TableKind, TableRows,
};

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

//! Systab CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **rows**: Print the data rows of a table file, raw or parsed as one of
//!   the classification tables, as text or JSON Lines
//! - **count**: Print the number of data rows in a table file
//!
//! Both commands stream the file through [`systab_stream`]; `rows --limit`
//! closes the reader as soon as enough rows were printed.

pub mod cli;
pub mod commands;
pub mod error;

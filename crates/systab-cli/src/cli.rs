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

//! CLI command definitions and argument parsing.

use crate::commands::{self, OutputFormat};
use crate::error::CliError;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;
use systab_stream::TableReaderConfig;
use systab_tables::TableKind;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use systab_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print the data rows of a table file
    ///
    /// The header line is skipped. Without `--table` rows are printed as raw
    /// `;`-separated fields; with it each row is parsed as that table.
    Rows {
        /// Table file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Table layout used to parse each row
        #[arg(short, long, value_enum, default_value_t = TableArg::Raw)]
        table: TableArg,

        /// Print one JSON object per row
        #[arg(long)]
        json: bool,

        /// Stop after this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        reader: ReaderArgs,
    },

    /// Count the data rows of a table file
    Count {
        /// Table file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        reader: ReaderArgs,
    },
}

/// Table layouts accepted by `--table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Raw,
    Chapter,
    Group,
    Category,
    Subcategory,
    MorphologyGroup,
    MorphologyCategory,
}

impl TableArg {
    /// The typed table, or `None` for raw fields.
    pub fn kind(self) -> Option<TableKind> {
        match self {
            TableArg::Raw => None,
            TableArg::Chapter => Some(TableKind::Chapter),
            TableArg::Group => Some(TableKind::Group),
            TableArg::Category => Some(TableKind::Category),
            TableArg::Subcategory => Some(TableKind::Subcategory),
            TableArg::MorphologyGroup => Some(TableKind::MorphologyGroup),
            TableArg::MorphologyCategory => Some(TableKind::MorphologyCategory),
        }
    }
}

/// Reader tuning shared by every command.
#[derive(Debug, Clone, Args)]
pub struct ReaderArgs {
    /// Bytes requested from the file per read
    #[arg(long, default_value_t = TableReaderConfig::default().chunk_size)]
    pub chunk_size: usize,

    /// Line batches buffered ahead of the consumer
    #[arg(long, default_value_t = TableReaderConfig::default().queue_capacity)]
    pub queue_capacity: usize,
}

impl ReaderArgs {
    /// Reader configuration for these flags.
    pub fn config(&self) -> TableReaderConfig {
        TableReaderConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_queue_capacity(self.queue_capacity)
    }
}

impl Commands {
    /// Execute the command on a single-threaded tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the runtime cannot start or the command fails.
    pub fn execute(self) -> Result<(), CliError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        runtime.block_on(async move {
            match self {
                Commands::Rows {
                    file,
                    table,
                    json,
                    limit,
                    reader,
                } => {
                    let format = if json {
                        OutputFormat::Json
                    } else {
                        OutputFormat::Text
                    };
                    commands::rows(&file, table.kind(), format, limit, reader.config()).await
                }
                Commands::Count { file, reader } => commands::count(&file, reader.config()).await,
            }
        })
    }
}

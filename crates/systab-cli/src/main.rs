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

//! Systab Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use systab_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// Systab - streaming reader for classification tables
///
/// # Examples
///
/// ```bash
/// # Count the rows of a category table
/// systab count categories.txt
///
/// # First ten chapters as JSON Lines
/// systab rows chapters.txt --table chapter --json --limit 10
///
/// # Show reader activity
/// RUST_LOG=systab=debug systab rows groups.txt
/// ```
#[derive(Parser)]
#[command(name = "systab")]
#[command(author, version, about = "Systab - streaming reader for classification tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("systab=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        // Downstream closed the pipe; nothing left to report.
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

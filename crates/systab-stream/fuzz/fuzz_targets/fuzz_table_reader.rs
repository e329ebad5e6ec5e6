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

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use systab_stream::{RawFields, RawRow, TableReader, TableReaderConfig};

/// Fuzz target for the table reader.
///
/// The first byte selects the chunk size and the line-length limit so chunk
/// boundaries land everywhere and the limit is hit often. Every chunking of
/// the same input must yield the same rows and fail, if at all, with the same
/// error after them.
///
/// # Running the Fuzzer
///
/// ```bash
/// cd crates/systab-stream
/// cargo fuzz run fuzz_table_reader -- -max_len=100000
/// ```
fuzz_target!(|data: &[u8]| {
    let Some((&selector, input)) = data.split_first() else {
        return;
    };
    let chunk_size = usize::from(selector % 16) + 1;
    let max_line_length = usize::from(selector / 16) * 8 + 1;

    let config = TableReaderConfig {
        max_line_length,
        ..Default::default()
    };
    let whole = read_all(input, config.clone());
    let chunked = read_all(input, config.with_chunk_size(chunk_size));
    assert_eq!(whole, chunked);
});

/// Every result of one read, errors rendered so runs can be compared.
fn read_all(input: &[u8], config: TableReaderConfig) -> Vec<Result<Vec<String>, String>> {
    match TableReader::with_config(Cursor::new(input), config, RawFields) {
        Ok(reader) => reader
            .map(|r| r.map(RawRow::into_fields).map_err(|e| e.to_string()))
            .collect(),
        Err(e) => vec![Err(e.to_string())],
    }
}

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

//! Property-based tests for chunk-boundary independence.
//!
//! - Any split of the same bytes yields the same rows
//! - The header never reaches the caller
//! - An unterminated tail is never a row
//! - A failure after N chunks yields exactly the rows those chunks completed
//! - The line-length limit gives the same rows and error for any split

mod common;

use common::{Scripted, T};
use proptest::prelude::*;
use std::io::ErrorKind;
use systab_stream::{AsyncTableReader, RawFields, RawRow, TableReader, TableReaderConfig};

/// Field text without separators or line breaks. Includes Latin-1 letters.
fn field() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,\\-äöüß]{0,12}").expect("Failed to create field regex")
}

fn record() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field(), 1..5)
}

/// Header plus data records, and an optional unterminated tail.
fn document() -> impl Strategy<Value = (Vec<Vec<String>>, Option<Vec<String>>)> {
    (
        prop::collection::vec(record(), 1..20),
        prop::option::of(record()),
    )
}

/// Encode as Latin-1 bytes.
fn encode(records: &[Vec<String>], tail: &Option<Vec<String>>) -> Vec<u8> {
    let mut text: String = records.iter().map(|r| format!("{}{}", r.join(";"), T)).collect();
    if let Some(tail) = tail {
        text.push_str(&tail.join(";"));
    }
    text.chars().map(|c| c as u32 as u8).collect()
}

/// Every result of a sync read, errors rendered for comparison.
fn results_with_limit(reader: Scripted, limit: usize) -> Vec<Result<Vec<String>, String>> {
    let config = TableReaderConfig {
        max_line_length: limit,
        ..Default::default()
    };
    TableReader::with_config(reader, config, RawFields)
        .expect("valid config")
        .map(|r| r.map(RawRow::into_fields).map_err(|e| e.to_string()))
        .collect()
}

fn read_sync(reader: Scripted) -> Vec<Vec<String>> {
    TableReader::new(reader, RawFields)
        .map(|r| r.expect("no error expected").into_fields())
        .collect()
}

fn read_async(reader: Scripted, config: TableReaderConfig) -> Vec<Vec<String>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");
    runtime.block_on(async move {
        AsyncTableReader::from_reader(reader, config, RawFields)
            .expect("valid config")
            .collect_rows()
            .await
            .expect("no error expected")
            .into_iter()
            .map(RawRow::into_fields)
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_any_split_yields_same_rows(
        (records, tail) in document(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let bytes = encode(&records, &tail);
        let expected: Vec<Vec<String>> = records[1..].to_vec();

        prop_assert_eq!(read_sync(Scripted::new(&[bytes.clone()])), expected.clone());
        prop_assert_eq!(read_sync(Scripted::split(&bytes, &cuts)), expected.clone());
        prop_assert_eq!(
            read_async(Scripted::split(&bytes, &cuts), TableReaderConfig::default()),
            expected
        );
    }

    #[test]
    fn prop_chunk_size_does_not_matter(
        (records, tail) in document(),
        chunk_size in 1usize..32,
        queue_capacity in 1usize..4,
    ) {
        let bytes = encode(&records, &tail);
        let config = TableReaderConfig::default()
            .with_chunk_size(chunk_size)
            .with_queue_capacity(queue_capacity);

        let rows = read_async(Scripted::new(&[bytes]), config);
        prop_assert_eq!(rows, records[1..].to_vec());
    }

    #[test]
    fn prop_failure_yields_completed_rows_then_error(
        (records, _tail) in document(),
        cuts in prop::collection::vec(any::<usize>(), 1..6),
    ) {
        let bytes = encode(&records, &None);
        let cut = cuts[0] % (bytes.len() + 1);
        let delivered = &bytes[..cut];

        // Rows completed by the delivered prefix, minus the header
        let complete_lines = String::from_utf8_lossy(delivered).matches(T).count();
        let expected: Vec<Vec<String>> = records
            .iter()
            .take(complete_lines)
            .skip(1)
            .cloned()
            .collect();

        let reader = Scripted::split(delivered, &cuts[1..]).fail_with(ErrorKind::Other);
        let mut rows = Vec::new();
        let mut failed = false;
        for result in TableReader::new(reader, RawFields) {
            match result {
                Ok(row) => {
                    prop_assert!(!failed, "row after error");
                    rows.push(row.into_fields());
                }
                Err(e) => {
                    prop_assert!(e.is_source_error());
                    failed = true;
                }
            }
        }

        prop_assert!(failed);
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn prop_line_limit_independent_of_split(
        (records, tail) in document(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
        limit in 1usize..40,
    ) {
        let bytes = encode(&records, &tail);
        let whole = results_with_limit(Scripted::new(&[bytes.clone()]), limit);
        let split = results_with_limit(Scripted::split(&bytes, &cuts), limit);
        prop_assert_eq!(&whole, &split);

        // The first over-long terminated line decides the outcome
        let first_long = records.iter().position(|r| r.join(";").chars().count() > limit);
        match first_long {
            Some(index) => {
                let last = whole.last().expect("error expected");
                prop_assert!(last.is_err());
                prop_assert_eq!(whole.len(), index.max(1));
            }
            None => prop_assert!(whole.iter().all(Result::is_ok)),
        }
    }
}

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

//! String cleanup rules shared by the table parsers.

/// Strip a leading roman-numeral chapter prefix such as `"IV. "` or `"XXII "`.
///
/// The prefix must consist only of roman-numeral letters and be followed by a
/// period or whitespace. Text without such a prefix is returned trimmed.
///
/// # Examples
///
/// ```rust
/// use systab_tables::strip_roman_prefix;
///
/// assert_eq!(strip_roman_prefix("IV. Endocrine diseases"), "Endocrine diseases");
/// assert_eq!(strip_roman_prefix("XXII Special purposes"), "Special purposes");
/// assert_eq!(strip_roman_prefix("Mental disorders"), "Mental disorders");
/// ```
pub fn strip_roman_prefix(text: &str) -> &str {
    let text = text.trim();
    let numeral_len = text
        .find(|c: char| !matches!(c, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
        .unwrap_or(text.len());
    if numeral_len == 0 {
        return text;
    }

    let rest = &text[numeral_len..];
    let rest = match rest.strip_prefix('.') {
        Some(after_dot) => after_dot,
        None if rest.starts_with(char::is_whitespace) => rest,
        None => return text,
    };

    let rest = rest.trim_start();
    if rest.is_empty() {
        text
    } else {
        rest
    }
}

/// Strip a fixed-width code prefix, e.g. `"A00 "` in front of a title.
///
/// `width` counts characters. Text no longer than the prefix is returned
/// trimmed and otherwise unchanged.
///
/// # Examples
///
/// ```rust
/// use systab_tables::strip_code_prefix;
///
/// assert_eq!(strip_code_prefix("A00 Cholera", 4), "Cholera");
/// assert_eq!(strip_code_prefix("A00", 4), "A00");
/// ```
pub fn strip_code_prefix(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((offset, _)) => text[offset..].trim(),
        None => text.trim(),
    }
}

/// Split a comma-separated code list, dropping empty entries.
///
/// # Examples
///
/// ```rust
/// use systab_tables::split_code_list;
///
/// assert_eq!(split_code_list("A01, A02-A03,,B05 "), vec!["A01", "A02-A03", "B05"]);
/// assert!(split_code_list("  ").is_empty());
/// ```
pub fn split_code_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed field text, `None` when blank.
pub(crate) fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

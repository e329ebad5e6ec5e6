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

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Terminator used by table files.
pub const T: &str = ";\r\n";

/// Reader delivering one scripted chunk per read, then an optional failure.
pub struct Scripted {
    chunks: VecDeque<Vec<u8>>,
    failure: Option<ErrorKind>,
}

impl Scripted {
    pub fn new<S: AsRef<[u8]>>(chunks: &[S]) -> Self {
        Self {
            chunks: chunks
                .iter()
                .map(|c| c.as_ref().to_vec())
                .filter(|c| !c.is_empty())
                .collect(),
            failure: None,
        }
    }

    /// Split `input` at the given byte offsets.
    pub fn split(input: &[u8], cuts: &[usize]) -> Self {
        let mut offsets: Vec<usize> = cuts.iter().map(|c| c % (input.len() + 1)).collect();
        offsets.push(0);
        offsets.push(input.len());
        offsets.sort_unstable();
        offsets.dedup();

        let chunks: Vec<&[u8]> = offsets.windows(2).map(|w| &input[w[0]..w[1]]).collect();
        Self::new(chunks.as_slice())
    }

    pub fn fail_with(mut self, kind: ErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    fn fill(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match self.chunks.front_mut() {
            Some(chunk) => {
                let n = chunk.len().min(out.len());
                out[..n].copy_from_slice(&chunk[..n]);
                chunk.drain(..n);
                if chunk.is_empty() {
                    self.chunks.pop_front();
                }
                Ok(n)
            }
            None => match self.failure.take() {
                Some(kind) => Err(io::Error::new(kind, "injected failure")),
                None => Ok(0),
            },
        }
    }
}

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill(buf)
    }
}

impl AsyncRead for Scripted {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let result = this.fill(buf.initialize_unfilled()).map(|n| buf.advance(n));
        Poll::Ready(result)
    }
}

/// Reader wrapper that records when it is dropped.
pub struct Tracked<R> {
    inner: R,
    dropped: Arc<AtomicBool>,
}

impl<R> Tracked<R> {
    pub fn new(inner: R) -> (Self, Arc<AtomicBool>) {
        let dropped = Arc::new(AtomicBool::new(false));
        let reader = Self {
            inner,
            dropped: Arc::clone(&dropped),
        };
        (reader, dropped)
    }
}

impl<R> Drop for Tracked<R> {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for Tracked<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_read(cx, buf)
    }
}

/// Build a table file body from rows of fields, header first.
pub fn table(rows: &[&[&str]]) -> String {
    rows.iter()
        .map(|fields| format!("{}{}", fields.join(";"), T))
        .collect()
}

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

//! Reader with scripted chunk boundaries and failures, for unit tests.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};

/// Delivers each scripted chunk as one read, then an optional failure.
pub(crate) struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
    failure: Option<ErrorKind>,
}

impl ChunkedReader {
    pub(crate) fn new(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.as_bytes().to_vec())
                .collect(),
            failure: None,
        }
    }

    pub(crate) fn fail_with(mut self, kind: ErrorKind) -> Self {
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

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill(buf)
    }
}

#[cfg(feature = "async")]
impl tokio::io::AsyncRead for ChunkedReader {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        let this = self.get_mut();
        let result = this.fill(buf.initialize_unfilled()).map(|n| buf.advance(n));
        std::task::Poll::Ready(result)
    }
}

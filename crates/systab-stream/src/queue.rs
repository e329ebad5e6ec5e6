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

//! Bridge between the push-driven source and the pull-driven reader.
//!
//! A producer task reads chunks, assembles lines and sends one batch per chunk
//! over a bounded channel. The bound is the backpressure: when the consumer
//! falls behind, `send` waits and the resource is not read any further until
//! a slot frees up.
//!
//! The consumer side never sees a sentinel error. Normal end and failure
//! both arrive as [`Wait::Drained`]; a failure additionally leaves its error
//! in the stream state, which the reader checks once the queue is drained.

use crate::assembler::{LineAssembler, RowBatch};
use crate::error::TableError;
use crate::source::ByteSource;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Messages from the producer task. Channel closure means the source ended.
#[derive(Debug)]
enum SourceEvent {
    Batch(RowBatch),
    Failed(TableError),
}

/// Outcome of waiting for the next batch.
#[derive(Debug)]
pub(crate) enum Wait {
    Batch(RowBatch),
    /// The source ended and every batch has been delivered.
    Drained,
}

/// Stream flags owned by one queue.
///
/// `error` holds a producer failure from the moment it is received until the
/// reader takes it after draining.
#[derive(Debug, Default)]
struct StreamState {
    ended: bool,
    error: Option<TableError>,
}

/// Consumer end of the batch queue.
///
/// Dropping the queue aborts the producer, which closes the resource.
#[derive(Debug)]
pub(crate) struct RowBatchQueue {
    rx: mpsc::Receiver<SourceEvent>,
    producer: JoinHandle<()>,
    state: StreamState,
}

impl RowBatchQueue {
    /// Start the producer task for `source`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub(crate) fn spawn<R>(source: ByteSource<R>, assembler: LineAssembler, capacity: usize) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let producer = tokio::spawn(produce(source, assembler, tx));
        Self {
            rx,
            producer,
            state: StreamState::default(),
        }
    }

    /// Wait for the next batch in file order.
    ///
    /// Batches the producer sent ahead of a failure are handed out first
    /// because the channel is FIFO; the failure itself ends the stream and is
    /// kept for [`take_error`](Self::take_error).
    pub(crate) async fn next_batch(&mut self) -> Wait {
        if self.state.ended {
            return Wait::Drained;
        }

        match self.rx.recv().await {
            Some(SourceEvent::Batch(batch)) => Wait::Batch(batch),
            Some(SourceEvent::Failed(err)) => {
                self.state.ended = true;
                self.state.error = Some(err);
                Wait::Drained
            }
            None => {
                self.state.ended = true;
                Wait::Drained
            }
        }
    }

    /// Take a failure recorded but not yet reported.
    pub(crate) fn take_error(&mut self) -> Option<TableError> {
        self.state.error.take()
    }

    /// Stop the producer and close the resource. Pending batches are dropped.
    pub(crate) fn close(&mut self) {
        if !self.state.ended {
            debug!("closing table source early");
        }
        self.state.ended = true;
        self.rx.close();
        self.producer.abort();
    }
}

impl Drop for RowBatchQueue {
    fn drop(&mut self) {
        self.producer.abort();
    }
}

async fn produce<R>(
    mut source: ByteSource<R>,
    mut assembler: LineAssembler,
    tx: mpsc::Sender<SourceEvent>,
) where
    R: AsyncRead + Unpin,
{
    loop {
        let failure = match source.read_chunk().await {
            Ok(Some(chunk)) => {
                if let Some(batch) = assembler.feed(&chunk) {
                    trace!(
                        first_line = batch.first_line(),
                        lines = batch.len(),
                        "assembled batch"
                    );
                    if tx.send(SourceEvent::Batch(batch)).await.is_err() {
                        debug!("table reader dropped; closing source");
                        return;
                    }
                }
                match assembler.take_error() {
                    Some(err) => err,
                    None => continue,
                }
            }
            Ok(None) => {
                if let Some(length) = assembler.finish() {
                    warn!(
                        line = assembler.lines_emitted() + 1,
                        bytes = length,
                        "discarding unterminated trailing line"
                    );
                }
                debug!(
                    bytes = source.bytes_read(),
                    lines = assembler.lines_emitted(),
                    "table source ended"
                );
                return;
            }
            Err(source_err) => TableError::Source {
                line: assembler.lines_emitted(),
                source: source_err,
            },
        };

        debug!(error = %failure, "table source failed");
        // The reader may already be gone; nothing is left to do either way.
        let _ = tx.send(SourceEvent::Failed(failure)).await;
        return;
    }
}

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

//! Chunked, decoded reads from the underlying resource.
//!
//! Table files use a single-byte Latin-1 compatible charset, so every byte maps
//! to exactly one character and a chunk boundary can never split a character.

/// Decode Latin-1 bytes. Each byte becomes the code point of the same value.
///
/// # Examples
///
/// ```rust
/// use systab_stream::decode_latin1;
///
/// assert_eq!(decode_latin1(b"Fu\xdf;\r\n"), "Fuß;\r\n");
/// ```
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(feature = "async")]
pub use self::async_source::ByteSource;

#[cfg(feature = "async")]
mod async_source {
    use super::decode_latin1;
    use std::io;
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Async resource delivering decoded text chunks.
    ///
    /// Owns the resource: it is closed when the source is dropped, whether the
    /// stream ended, failed, or was abandoned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "async")]
    /// # async fn example() -> std::io::Result<()> {
    /// use systab_stream::ByteSource;
    /// use std::io::Cursor;
    ///
    /// let mut source = ByteSource::new(Cursor::new(b"abc".to_vec()), 2);
    /// assert_eq!(source.read_chunk().await?, Some("ab".to_string()));
    /// assert_eq!(source.read_chunk().await?, Some("c".to_string()));
    /// assert_eq!(source.read_chunk().await?, None);
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Debug)]
    pub struct ByteSource<R> {
        reader: R,
        buffer: Vec<u8>,
        bytes_read: u64,
        ended: bool,
    }

    impl<R: AsyncRead + Unpin> ByteSource<R> {
        /// Wrap a resource, reading at most `chunk_size` bytes per chunk.
        pub fn new(reader: R, chunk_size: usize) -> Self {
            Self {
                reader,
                buffer: vec![0; chunk_size.max(1)],
                bytes_read: 0,
                ended: false,
            }
        }

        /// Total bytes read so far.
        #[inline]
        pub fn bytes_read(&self) -> u64 {
            self.bytes_read
        }

        /// Read the next chunk.
        ///
        /// Returns `Ok(None)` once the resource is exhausted; later calls keep
        /// returning `Ok(None)` without touching the resource again.
        pub async fn read_chunk(&mut self) -> io::Result<Option<String>> {
            if self.ended {
                return Ok(None);
            }

            loop {
                match self.reader.read(&mut self.buffer).await {
                    Ok(0) => {
                        self.ended = true;
                        return Ok(None);
                    }
                    Ok(n) => {
                        self.bytes_read += n as u64;
                        return Ok(Some(decode_latin1(&self.buffer[..n])));
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii() {
        assert_eq!(decode_latin1(b"A00;Cholera;\r\n"), "A00;Cholera;\r\n");
    }

    #[test]
    fn test_decode_high_bytes() {
        // 0xE4 = a-umlaut, 0xFC = u-umlaut
        assert_eq!(decode_latin1(&[0x4b, 0xe4, 0x73, 0x65]), "Käse");
        assert_eq!(decode_latin1(&[0xfc]), "ü");
        assert_eq!(decode_latin1(&[0xff]).chars().count(), 1);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_latin1(&[]), "");
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::super::ByteSource;
        use crate::test_util::ChunkedReader;
        use std::io::ErrorKind;

        #[tokio::test]
        async fn test_chunks_follow_reader() {
            let reader = ChunkedReader::new(&["ab", "cde"]);
            let mut source = ByteSource::new(reader, 1024);
            assert_eq!(source.read_chunk().await.unwrap(), Some("ab".to_string()));
            assert_eq!(source.read_chunk().await.unwrap(), Some("cde".to_string()));
            assert_eq!(source.read_chunk().await.unwrap(), None);
            assert_eq!(source.read_chunk().await.unwrap(), None);
            assert_eq!(source.bytes_read(), 5);
        }

        #[tokio::test]
        async fn test_chunk_size_limits_read() {
            let reader = ChunkedReader::new(&["abcdef"]);
            let mut source = ByteSource::new(reader, 4);
            assert_eq!(source.read_chunk().await.unwrap(), Some("abcd".to_string()));
            assert_eq!(source.read_chunk().await.unwrap(), Some("ef".to_string()));
        }

        #[tokio::test]
        async fn test_error_surfaces() {
            let reader = ChunkedReader::new(&["ab"]).fail_with(ErrorKind::BrokenPipe);
            let mut source = ByteSource::new(reader, 1024);
            assert!(source.read_chunk().await.unwrap().is_some());
            let err = source.read_chunk().await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BrokenPipe);
        }
    }
}

//! Host-side message framing.
//!
//! Hosts deliver bytes in arbitrary chunks. [`MessageCodec`] accumulates
//! them and yields one complete message at a time, terminator included,
//! ready for [`crate::Interpreter::handle_message`].

use bytes::{Bytes, BytesMut};

use crate::error::CodecError;

/// Accumulates host bytes into complete messages.
#[derive(Debug)]
pub struct MessageCodec {
    buffer: BytesMut,
    terminator: u8,
    max_len: usize,
}

impl MessageCodec {
    /// Create a codec for `terminator` that rejects more than `max_len`
    /// buffered bytes without a terminator.
    pub fn new(terminator: u8, max_len: usize) -> Self {
        MessageCodec {
            buffer: BytesMut::with_capacity(max_len.min(4096)),
            terminator,
            max_len,
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to take the next complete message from the buffer.
    ///
    /// A carriage return just before the terminator is dropped and blank
    /// messages are skipped. Returns `Ok(None)` when more data is needed.
    pub fn decode(&mut self) -> Result<Option<Bytes>, CodecError> {
        loop {
            let Some(pos) = self.buffer.iter().position(|&b| b == self.terminator) else {
                if self.buffer.len() > self.max_len {
                    let actual = self.buffer.len();
                    self.buffer.clear();
                    return Err(CodecError::BufferOverflow {
                        max: self.max_len,
                        actual,
                    });
                }
                return Ok(None);
            };

            let mut message = self.buffer.split_to(pos + 1);
            if pos > 0 && message[pos - 1] == b'\r' {
                message.truncate(pos - 1);
                message.extend_from_slice(&[self.terminator]);
            }
            if message.len() == 1 {
                continue;
            }
            return Ok(Some(message.freeze()));
        }
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_across_chunks() {
        let mut codec = MessageCodec::new(b'\n', 64);
        codec.push(b"board:ver");
        assert_eq!(codec.decode(), Ok(None));
        codec.push(b"sion()\ndevice:");
        assert_eq!(codec.decode(), Ok(Some(Bytes::from_static(b"board:version()\n"))));
        assert_eq!(codec.decode(), Ok(None));
        assert_eq!(codec.buffered_len(), 7);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let mut codec = MessageCodec::new(b'\n', 64);
        codec.push(b"\r\n\nb:v()\r\n");
        assert_eq!(codec.decode(), Ok(Some(Bytes::from_static(b"b:v()\n"))));
        assert_eq!(codec.decode(), Ok(None));
    }

    #[test]
    fn test_overflow() {
        let mut codec = MessageCodec::new(b'\n', 8);
        codec.push(b"0123456789");
        assert_eq!(
            codec.decode(),
            Err(CodecError::BufferOverflow { max: 8, actual: 10 })
        );
        assert_eq!(codec.buffered_len(), 0);

        codec.push(b"b:v()\n");
        assert!(codec.decode().unwrap().is_some());
    }
}

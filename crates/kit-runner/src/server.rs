//! Host transport loop.
//!
//! Bytes from the host are framed by a [`MessageCodec`] and each complete
//! message is run through the shared interpreter. The interpreter lock is
//! held for one parse, dispatch and serialize cycle and never across an
//! await point.

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use kit_common::KitStatus;
use kit_protocol::{frame, CodecError, Interpreter, MessageCodec};
use metrics::counter;
use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::telemetry;

/// Interpreter shared between the host loops.
pub type SharedInterpreter = Arc<Mutex<Interpreter>>;

/// Room for target, command and delimiters on top of the payload limit.
const MESSAGE_OVERHEAD: usize = 64;

const READ_CHUNK: usize = 1024;

// ============================================================================
// Message Handling
// ============================================================================

/// Run one message and count the outcome.
pub fn dispatch(interp: &SharedInterpreter, message: &[u8]) -> Bytes {
    let mut interp = interp.lock();
    match interp.handle_message(message) {
        Ok(reply) => {
            counter!(telemetry::MESSAGES, "command" => reply.command.name()).increment(1);
            if !reply.status.is_success() {
                counter!(
                    telemetry::MESSAGE_FAILURES,
                    "command" => reply.command.name(),
                    "status" => format!("{:02X}", u8::from(reply.status))
                )
                .increment(1);
            }
            reply.response
        }
        Err(e) => {
            counter!(telemetry::PARSE_ERRORS).increment(1);
            debug!("Rejected message: {}", e);
            frame(e.status(), &[], interp.config())
        }
    }
}

/// Codec sized for the interpreter's configuration.
fn codec_for(interp: &SharedInterpreter) -> MessageCodec {
    let interp = interp.lock();
    MessageCodec::new(
        interp.config().message_byte(),
        interp.max_message_length() + MESSAGE_OVERHEAD,
    )
}

// ============================================================================
// Stream Loop
// ============================================================================

/// Serve one host connection until it closes.
///
/// An oversized buffer is discarded and answered with `InvalidSize`.
pub async fn serve<R, W>(mut reader: R, mut writer: W, interp: SharedInterpreter) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut codec = codec_for(&interp);
    let mut read_buf = [0u8; READ_CHUNK];

    loop {
        let n = reader.read(&mut read_buf).await?;
        if n == 0 {
            return Ok(());
        }
        codec.push(&read_buf[..n]);

        loop {
            let response = match codec.decode() {
                Ok(Some(message)) => dispatch(&interp, &message),
                Ok(None) => break,
                Err(CodecError::BufferOverflow { max, actual }) => {
                    warn!("Discarded {} buffered bytes (limit {})", actual, max);
                    counter!(telemetry::OVERFLOWS).increment(1);
                    let guard = interp.lock();
                    frame(KitStatus::InvalidSize, &[], guard.config())
                }
            };
            writer.write_all(&response).await?;
        }
        writer.flush().await?;
    }
}

/// Accept TCP hosts one at a time.
///
/// A connection error ends that connection only.
pub async fn serve_tcp(listener: TcpListener, interp: SharedInterpreter) -> io::Result<()> {
    loop {
        let (mut stream, peer) = listener.accept().await?;
        info!("Host connected from {}", peer);
        counter!(telemetry::CONNECTIONS).increment(1);

        let (reader, writer) = stream.split();
        match serve(reader, writer, interp.clone()).await {
            Ok(()) => info!("Host {} disconnected", peer),
            Err(e) => warn!("Connection error with {}: {}", peer, e),
        }
    }
}

/// Serve a single host over stdin and stdout.
pub async fn serve_stdio(interp: SharedInterpreter) -> io::Result<()> {
    serve(tokio::io::stdin(), tokio::io::stdout(), interp).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_protocol::KitHandler;

    struct Nothing;

    impl KitHandler for Nothing {}

    fn shared() -> SharedInterpreter {
        let interp = Interpreter::builder().handler(Nothing).build().unwrap();
        Arc::new(Mutex::new(interp))
    }

    #[test]
    fn test_dispatch_renders_errors() {
        let interp = shared();
        assert_eq!(dispatch(&interp, b"board:version()\n"), Bytes::from_static(b"E1()\n"));
        assert_eq!(dispatch(&interp, b"x:version()\n"), Bytes::from_static(b"E0()\n"));
        assert!(interp.lock().last_error().is_some());
    }

    #[test]
    fn test_codec_limit_follows_config() {
        let interp = shared();
        let mut codec = codec_for(&interp);
        codec.push(&vec![b'A'; 2048 + MESSAGE_OVERHEAD]);
        assert_eq!(codec.decode(), Ok(None));
        codec.push(b"A");
        assert!(codec.decode().is_err());
    }
}

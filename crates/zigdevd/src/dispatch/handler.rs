//! Connection handler that dispatches JSONL requests.
//!
//! Each connection carries one request line and receives at most one
//! response line; silent no-ops close the connection without writing.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::errors::DispatchError;
use super::request::RequestEnvelope;
use super::response::ResponseWriter;
use super::router::{DISPATCH_TARGET, DispatchContext, RequestRouter};

/// Maximum size of a single request line in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Connection handler that parses and dispatches JSONL requests.
pub struct DispatchConnectionHandler {
    router: RequestRouter,
}

impl DispatchConnectionHandler {
    /// Creates a handler serving requests with `context`.
    pub fn new(context: DispatchContext) -> Self {
        Self {
            router: RequestRouter::new(context),
        }
    }

    /// Reads one request from `stream` and writes the response.
    pub(crate) fn serve<S: Read + Write>(&self, mut stream: S) {
        let request_bytes = match read_request_line(&mut stream) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(target: DISPATCH_TARGET, "client disconnected without request");
                return;
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to read request");
                write_or_log(ResponseWriter::new(&mut stream).write_error(None, &error));
                return;
            }
        };

        let mut writer = ResponseWriter::new(&mut stream);

        let envelope = match RequestEnvelope::parse(&request_bytes) {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "malformed request");
                write_or_log(writer.write_error(None, &error));
                return;
            }
        };

        match self.router.route(&envelope) {
            Ok(Some(message)) => write_or_log(writer.write_response(&envelope, &message)),
            Ok(None) => {}
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command = %envelope.command,
                    %error,
                    "request failed"
                );
                write_or_log(writer.write_error(Some(&envelope), &error));
            }
        }
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.serve(stream);
    }
}

fn write_or_log(result: Result<(), DispatchError>) {
    if let Err(error) = result {
        warn!(target: DISPATCH_TARGET, %error, "failed to write response");
    }
}

/// Reads a bounded JSONL request line from the stream.
///
/// Returns `Ok(None)` if the client disconnects without sending data and
/// `Ok(Some(bytes))` once a complete line (or EOF with partial data) is
/// received.
fn read_request_line<R: Read>(stream: &mut R) -> Result<Option<Vec<u8>>, DispatchError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;

        if bytes_read == 0 {
            return Ok(if buffer.is_empty() {
                None
            } else {
                Some(buffer)
            });
        }

        if let Some(newline_pos) = chunk[..bytes_read].iter().position(|b| *b == b'\n') {
            buffer.extend_from_slice(&chunk[..=newline_pos]);
            enforce_limit(buffer.len())?;
            return Ok(Some(buffer));
        }

        buffer.extend_from_slice(&chunk[..bytes_read]);
        enforce_limit(buffer.len())?;
    }
}

/// Reads from the stream, retrying on interrupts.
fn read_with_retry<R: Read>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn enforce_limit(size: usize) -> Result<(), DispatchError> {
    if size > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(size, MAX_REQUEST_BYTES));
    }
    Ok(())
}

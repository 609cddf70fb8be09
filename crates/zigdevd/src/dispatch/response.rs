//! Response serialization helpers for the dispatch loop.
//!
//! A response is one JSONL line echoing the request's `command`, `from` and
//! `callback` with the result under `message`:
//!
//! ```json
//! {"command":"sendToZigbee","from":"admin.0","callback":7,"message":{"error":"Incomplete data (cid or cmd)"}}
//! ```

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::command::CommandResult;
use super::errors::DispatchError;
use super::request::RequestEnvelope;

#[derive(Debug, Serialize)]
struct ResponseEnvelope<'a, T> {
    command: Option<&'a str>,
    from: &'a Value,
    callback: &'a Value,
    message: &'a T,
}

/// Writer that serializes responses to a stream.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `message` as the answer to `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_response<T: Serialize>(
        &mut self,
        request: &RequestEnvelope,
        message: &T,
    ) -> Result<(), DispatchError> {
        self.write_line(&ResponseEnvelope {
            command: Some(request.command.as_str()),
            from: &request.from,
            callback: &request.callback,
            message,
        })
    }

    /// Writes `error` as the answer to `request`.
    ///
    /// Without a parsed request the correlation fields are `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_error(
        &mut self,
        request: Option<&RequestEnvelope>,
        error: &DispatchError,
    ) -> Result<(), DispatchError> {
        let result = CommandResult::failure(error);
        match request {
            Some(request) => self.write_response(request, &result),
            None => self.write_line(&ResponseEnvelope {
                command: None,
                from: &Value::Null,
                callback: &Value::Null,
                message: &result,
            }),
        }
    }

    fn write_line<T: Serialize>(
        &mut self,
        response: &ResponseEnvelope<'_, T>,
    ) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn envelope() -> RequestEnvelope {
        RequestEnvelope::parse(
            br#"{"command":"getLibData","message":{"key":"typeList"},"from":"admin.0","callback":{"id":7}}"#,
        )
        .expect("envelope")
    }

    fn written(output: Vec<u8>) -> Value {
        let text = String::from_utf8(output).expect("valid utf8");
        assert!(text.ends_with('\n'));
        serde_json::from_str(text.trim_end()).expect("json line")
    }

    #[test]
    fn echoes_correlation_fields() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output)
            .write_response(&envelope(), &json!({"key": "typeList", "list": {}}))
            .expect("write response");

        assert_eq!(
            written(output),
            json!({
                "command": "getLibData",
                "from": "admin.0",
                "callback": {"id": 7},
                "message": {"key": "typeList", "list": {}}
            })
        );
    }

    #[test]
    fn errors_carry_only_text() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output)
            .write_error(Some(&envelope()), &DispatchError::IncompleteRequest)
            .expect("write error");

        let response = written(output);
        assert_eq!(
            response["message"],
            json!({"error": "Incomplete data (cid or cmd)"})
        );
        assert_eq!(response["callback"], json!({"id": 7}));
    }

    #[test]
    fn uncorrelated_errors_use_null_fields() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output)
            .write_error(None, &DispatchError::malformed("empty request line"))
            .expect("write error");

        let response = written(output);
        assert!(response["command"].is_null());
        assert!(response["from"].is_null());
        assert!(response["callback"].is_null());
        assert_eq!(
            response["message"]["error"],
            json!("malformed JSONL: empty request line")
        );
    }
}

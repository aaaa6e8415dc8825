// NDJSON framing for engine responses. Stdout carries only protocol lines;
// anything diagnostic goes through tracing to stderr.

use std::io::{self, Write};

use serde::Serialize;

#[derive(Serialize)]
struct JsonRpcResponse {
	jsonrpc: &'static str,
	id: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	result: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<JsonRpcErrorBody>,
}

impl JsonRpcResponse {
	fn success(id: u64, result: serde_json::Value) -> Self {
		Self {
			jsonrpc: "2.0",
			id,
			result: Some(result),
			error: None,
		}
	}

	fn failure(id: u64, error: JsonRpcErrorBody) -> Self {
		Self {
			jsonrpc: "2.0",
			id,
			result: None,
			error: Some(error),
		}
	}
}

#[derive(Serialize)]
struct JsonRpcErrorBody {
	code: i32,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<serde_json::Value>,
}

/// Writes JSON-RPC responses to stdout, one JSON document per line.
pub struct NdjsonTransport;

impl Default for NdjsonTransport {
	fn default() -> Self {
		Self::new()
	}
}

impl NdjsonTransport {
	pub fn new() -> Self {
		Self
	}

	pub fn write_response(&self, id: u64, result: serde_json::Value) {
		tracing::trace!(id, "sending result");
		emit(&JsonRpcResponse::success(id, result));
	}

	pub fn write_error(
		&self,
		id: u64,
		code: i32,
		message: impl Into<String>,
		data: Option<serde_json::Value>,
	) {
		let message = message.into();
		tracing::trace!(id, code, %message, "sending error");
		emit(&JsonRpcResponse::failure(
			id,
			JsonRpcErrorBody {
				code,
				message,
				data,
			},
		));
	}
}

fn emit(response: &JsonRpcResponse) {
	let mut stdout = io::stdout().lock();
	if let Err(e) = write_frame(&mut stdout, response) {
		tracing::error!(id = response.id, "Failed to write response: {}", e);
	}
}

/// Serialize `response` as a single line and flush. Nothing is written when
/// serialization fails, so a bad value never leaves half a line on the wire.
fn write_frame<W: Write>(out: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
	let mut line = serde_json::to_vec(response)?;
	line.push(b'\n');
	out.write_all(&line)?;
	out.flush()
}

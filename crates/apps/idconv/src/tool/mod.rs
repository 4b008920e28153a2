//! Stdio tool server exposing `convert_to` and the satellite ID resources
//! to a host process.
//!
//! One JSON-RPC message per line in, one response per line out. Requests are
//! handled strictly in order. Logs go to stderr, never to the response
//! channel.

pub mod protocol;

use std::io::{self, BufRead, Write};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use storj_idconv::engine::FormatEngine;
use storj_idconv::satellites::{self, SATELLITES};

use crate::config::IdconvConfig;
use protocol::{
    ConvertArgs, ResourceReadParams, RpcRequest, RpcResponse, ToolCallParams, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};

pub const SERVER_NAME: &str = "idconv";
pub const CONVERT_TOOL: &str = "convert_to";
const CONVERT_TOOL_DESCRIPTION: &str = "Convert one ID of Storj world from one representation \
     to other (such as NodeID, HEX, Base64, Base58, Base32 or PieceID)";

#[derive(Debug)]
pub struct ToolServer {
    engine: FormatEngine,
}

impl ToolServer {
    pub fn new(engine: FormatEngine) -> Self {
        Self { engine }
    }

    /// Standard formats minus the configured hidden ones.
    pub fn from_config(config: &IdconvConfig) -> Self {
        let engine =
            FormatEngine::standard(config.resolver_config()).without(&config.tool.hidden_formats);
        Self::new(engine)
    }

    pub fn engine(&self) -> &FormatEngine {
        &self.engine
    }

    /// Serves until `input` reaches end of file.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if let Some(reply) = self.handle_line(&line) {
                output.write_all(reply.as_bytes())?;
                output.write_all(b"\n")?;
                output.flush()?;
            }
        }
        debug!("tool server input closed");
        Ok(())
    }

    /// Serialized response for one input line, `None` for blank lines and
    /// notifications.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let response = match serde_json::from_str::<Value>(line) {
            Err(err) => Some(RpcResponse::failure(Value::Null, PARSE_ERROR, err.to_string())),
            Ok(value) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<RpcRequest>(value) {
                    Ok(request) => self.handle(request),
                    Err(err) => Some(RpcResponse::failure(id, INVALID_REQUEST, err.to_string())),
                }
            }
        }?;
        match serde_json::to_string(&response) {
            Ok(encoded) => Some(encoded),
            Err(err) => {
                warn!("dropping unserializable response: {err}");
                None
            }
        }
    }

    pub fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!("tool request {}", request.method);
        if request.is_notification() {
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "resources": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params),
            "resources/list" => Ok(list_resources()),
            "resources/read" => read_resource(request.params),
            other => Err((METHOD_NOT_FOUND, format!("method not found: {other}"))),
        };
        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err((code, message)) => RpcResponse::failure(id, code, message),
        })
    }

    fn list_tools(&self) -> Value {
        json!({
            "tools": [{
                "name": CONVERT_TOOL,
                "description": CONVERT_TOOL_DESCRIPTION,
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "ID": { "type": "string", "description": "identifier in any known encoding" },
                        "DestinationFormat": {
                            "type": "string",
                            "description": format!("one of {}", self.engine.encoders().names().join(",")),
                        },
                    },
                    "required": ["ID", "DestinationFormat"],
                },
            }]
        })
    }

    fn call_tool(&self, params: Option<Value>) -> Result<Value, (i64, String)> {
        let call: ToolCallParams = parse_params(params)?;
        if call.name != CONVERT_TOOL {
            return Err((INVALID_PARAMS, format!("unknown tool: {}", call.name)));
        }
        let args: ConvertArgs = parse_params(Some(call.arguments))?;
        let lines = match self.engine.convert(&args.id, &args.destination_format) {
            Ok(outcome) => outcome.lines(&args.id),
            Err(err) => vec![err.to_string()],
        };
        let content: Vec<Value> =
            lines.into_iter().map(|text| json!({ "type": "text", "text": text })).collect();
        Ok(json!({ "content": content, "isError": false }))
    }
}

fn list_resources() -> Value {
    let resources: Vec<Value> = SATELLITES
        .iter()
        .map(|satellite| {
            json!({
                "uri": satellite.uri(),
                "name": satellite.title(),
                "description": satellite.description(),
                "mimeType": "text/plain",
            })
        })
        .collect();
    json!({ "resources": resources })
}

fn read_resource(params: Option<Value>) -> Result<Value, (i64, String)> {
    let read: ResourceReadParams = parse_params(params)?;
    let satellite = satellites::lookup(&read.uri)
        .ok_or_else(|| (INVALID_PARAMS, format!("unknown resource: {}", read.uri)))?;
    Ok(json!({
        "contents": [{
            "uri": satellite.uri(),
            "mimeType": "text/plain",
            "text": satellite.node_id,
        }]
    }))
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, (i64, String)> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|err| (INVALID_PARAMS, format!("invalid params: {err}")))
}

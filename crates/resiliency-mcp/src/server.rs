use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use parking_lot::Mutex;
use resiliency_core::ScoringError;
use resiliency_report::{DiagnosticData, ReportError, ReportInput, ResourceInput};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::framing::{read_bounded_line, read_framed_body, Frame};
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, ToolsCallParams, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};

const DEFAULT_MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const KNOWN_TOOLS: [&str; 3] = ["resiliency_score", "resiliency_report", "resiliency_stats"];
/// Stats bucket shared by every tool name the server does not expose.
const UNKNOWN_TOOL: &str = "unknown";

#[derive(Debug, Clone, Copy, Default)]
struct ToolCounter {
    calls: u64,
    errors: u64,
}

pub struct ResiliencyServer {
    config: ServerConfig,
    tool_stats: Mutex<HashMap<String, ToolCounter>>,
}

impl ResiliencyServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::from_env())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            tool_stats: Mutex::new(HashMap::new()),
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "invalid jsonrpc version",
            ));
        }

        let is_notification = request.id.is_none();
        let id = request.id.clone().unwrap_or(Value::Null);

        if is_notification && request.method == "notifications/initialized" {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_MCP_PROTOCOL_VERSION);
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": {
                            "name": "resiliency-mcp",
                            "version": env!("CARGO_PKG_VERSION")
                        },
                        "capabilities": {
                            "tools": {
                                "listChanged": false
                            }
                        }
                    }),
                )
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, tools_list_result()),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "method not found"),
        };

        Some(response)
    }

    fn handle_tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let parsed: ToolsCallParams = match serde_json::from_value(params) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {err}"));
            }
        };

        let response = match parsed.name.as_str() {
            "resiliency_score" => self.exec_resiliency_score(id, parsed.arguments),
            "resiliency_report" => self.exec_resiliency_report(id, parsed.arguments),
            "resiliency_stats" => self.exec_resiliency_stats(id),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "unknown tool"),
        };
        if let Some(error) = &response.error {
            warn!(
                tool = %parsed.name,
                code = error.code,
                message = %error.message,
                "tool call failed"
            );
        }
        self.record_tool_call(&parsed.name, response.error.is_some());
        response
    }

    fn record_tool_call(&self, tool: &str, is_error: bool) {
        let key = if KNOWN_TOOLS.contains(&tool) {
            tool
        } else {
            UNKNOWN_TOOL
        };
        let mut stats = self.tool_stats.lock();
        let counter = stats.entry(key.to_string()).or_default();
        counter.calls += 1;
        if is_error {
            counter.errors += 1;
        }
    }

    fn exec_resiliency_score(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: ResourceInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        if args.feature_count() > self.config.max_features {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                format!("too many features: limit is {}", self.config.max_features),
            );
        }

        let resource = match args.into_resource() {
            Ok(v) => v,
            Err(err) => return scoring_error_response(id, &err),
        };
        let score = resource.overall_score();
        let features = match serde_json::to_value(resource.features()) {
            Ok(v) => v,
            Err(err) => return report_error_response(id, &ReportError::from(err)),
        };
        debug!(resource = resource.name(), score, "scored resource");

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!("resource={}, overall_score={:.1}", resource.name(), score)
                    }
                ],
                "structuredContent": {
                    "name": resource.name(),
                    "overall_score": score,
                    "features": features
                }
            }),
        )
    }

    fn exec_resiliency_report(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: ReportInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        if let Some(message) = self.check_report_limits(&args) {
            return JsonRpcResponse::error(id, INVALID_PARAMS, message);
        }

        let report = match args.into_report(&self.config.default_customer) {
            Ok(v) => v,
            Err(err) => return scoring_error_response(id, &err),
        };
        let data = match DiagnosticData::resiliency_report(Some(&report)) {
            Ok(Some(v)) => v,
            Ok(None) => {
                return JsonRpcResponse::error(id, INTERNAL_ERROR, "report produced no data")
            }
            Err(err) => return report_error_response(id, &err),
        };
        let rows = data.table.rows.len();
        let structured = match serde_json::to_value(&data) {
            Ok(v) => v,
            Err(err) => return report_error_response(id, &ReportError::from(err)),
        };
        info!(customer = report.customer_name(), rows, "built resiliency report");

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!(
                            "customer={}, resources={}, rows={}",
                            report.customer_name(),
                            report.resources().len(),
                            rows
                        )
                    }
                ],
                "structuredContent": structured
            }),
        )
    }

    fn check_report_limits(&self, args: &ReportInput) -> Option<String> {
        let resources = args.resources.as_ref()?;
        if resources.len() > self.config.max_resources {
            return Some(format!(
                "too many resources: limit is {}",
                self.config.max_resources
            ));
        }
        resources
            .iter()
            .find(|r| r.feature_count() > self.config.max_features)
            .map(|r| {
                format!(
                    "too many features on resource {}: limit is {}",
                    r.name, self.config.max_features
                )
            })
    }

    fn exec_resiliency_stats(&self, id: Value) -> JsonRpcResponse {
        let mut tools = self
            .tool_stats
            .lock()
            .iter()
            .map(|(name, counter)| (name.clone(), *counter))
            .collect::<Vec<_>>();
        tools.sort_by(|a, b| a.0.cmp(&b.0));

        let total_calls: u64 = tools.iter().map(|(_, c)| c.calls).sum();
        let tools = tools
            .into_iter()
            .map(|(name, c)| json!({"tool": name, "calls": c.calls, "errors": c.errors}))
            .collect::<Vec<_>>();

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!("tool_calls={total_calls}")
                    }
                ],
                "structuredContent": {
                    "total_calls": total_calls,
                    "tools": tools
                }
            }),
        )
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut reader = io::BufReader::new(stdin.lock());
        let mut stdout = io::stdout();
        info!("resiliency-mcp serving on stdio");
        self.serve(&mut reader, &mut stdout)
    }

    /// Reads requests from `reader` until EOF, answering on `writer` in the
    /// framing each request arrived with. Messages over `max_body_bytes` are
    /// skipped and answered with a parse error.
    pub fn serve<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> io::Result<()> {
        let limit = self.config.max_body_bytes;
        let mut line = String::new();

        loop {
            line.clear();
            match read_bounded_line(reader, &mut line, limit)? {
                None => break,
                Some(true) => {}
                Some(false) => {
                    warn!(limit, "dropped oversized stdio line");
                    let response = parse_error(format!("message exceeds the {limit} byte limit"));
                    Frame::LineDelimited.write(writer, &response)?;
                    continue;
                }
            }

            let trimmed = line.trim_end_matches(['\r', '\n']).trim_start();
            if trimmed.is_empty() {
                continue;
            }

            let (payload, frame) = if Frame::starts_header(trimmed) {
                match read_framed_body(reader, trimmed, limit) {
                    Ok(body) => (body, Frame::ContentLength),
                    Err(err) => {
                        warn!(error = %err, "rejected stdio frame");
                        err.reply_frame().write(writer, &parse_error(err.to_string()))?;
                        continue;
                    }
                }
            } else {
                (trimmed.as_bytes().to_vec(), Frame::LineDelimited)
            };

            let request: JsonRpcRequest = match serde_json::from_slice(&payload) {
                Ok(v) => v,
                Err(err) => {
                    frame.write(writer, &parse_error(format!("parse error: {err}")))?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                frame.write(writer, &response)?;
            }
        }

        Ok(())
    }
}

impl Default for ResiliencyServer {
    fn default() -> Self {
        Self::new()
    }
}

fn tools_list_result() -> Value {
    let feature_schema = json!({
        "type": "object",
        "required": ["name", "weight"],
        "properties": {
            "name": {"type": "string"},
            "weight": {"type": "integer", "enum": [25, 15, 5, 1, 0]},
            "grade": {"type": "integer", "enum": [0, 1, 2]},
            "grade_comments": {"type": "string"},
            "solution_comments": {"type": "string"}
        }
    });
    let resource_schema = json!({
        "type": "object",
        "required": ["name", "features"],
        "properties": {
            "name": {"type": "string"},
            "features": {"type": "array", "items": feature_schema}
        }
    });

    json!({
        "tools": [
            {
                "name": "resiliency_score",
                "description": "Compute the weighted resiliency score of one resource.",
                "inputSchema": resource_schema
            },
            {
                "name": "resiliency_report",
                "description": "Build a customer resiliency report as a Report-rendered table.",
                "inputSchema": {
                    "type": "object",
                    "required": ["resources"],
                    "properties": {
                        "customer_name": {"type": "string"},
                        "resources": {"type": "array", "items": resource_schema}
                    }
                }
            },
            {
                "name": "resiliency_stats",
                "description": "Per-tool call and error counters for this server.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    })
}

fn scoring_error_response(id: Value, err: &ScoringError) -> JsonRpcResponse {
    JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string())
}

fn report_error_response(id: Value, err: &ReportError) -> JsonRpcResponse {
    match err {
        ReportError::Scoring(inner) => scoring_error_response(id, inner),
        ReportError::Serde(_) => JsonRpcResponse::error(id, INTERNAL_ERROR, err.to_string()),
    }
}

fn parse_error(message: impl Into<String>) -> JsonRpcResponse {
    JsonRpcResponse::error(Value::Null, PARSE_ERROR, message)
}

fn parse_args<T: DeserializeOwned>(arguments: Option<Value>) -> Result<T, JsonRpcResponse> {
    let Some(args) = arguments else {
        return Err(JsonRpcResponse::error(
            Value::Null,
            INVALID_PARAMS,
            "missing tool arguments",
        ));
    };

    serde_json::from_value(args).map_err(|err| {
        JsonRpcResponse::error(
            Value::Null,
            INVALID_PARAMS,
            format!("invalid tool arguments: {err}"),
        )
    })
}

use std::io::Cursor;

use idconv_cli::config::IdconvConfig;
use idconv_cli::tool::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};
use idconv_cli::tool::ToolServer;
use serde_json::{json, Value};

const US1: &str = "12EayRS2V1kEsWESU9QMRseFhdxYxKicsiFmxrsLZHeLUtdps3S";

fn server() -> ToolServer {
    ToolServer::from_config(&IdconvConfig::default())
}

fn call(server: &ToolServer, request: Value) -> Value {
    let reply = server.handle_line(&request.to_string()).expect("reply");
    serde_json::from_str(&reply).expect("reply json")
}

fn texts(response: &Value) -> Vec<String> {
    response["result"]["content"]
        .as_array()
        .expect("content")
        .iter()
        .map(|item| item["text"].as_str().expect("text").to_string())
        .collect()
}

#[test]
fn initialize_reports_protocol_version() {
    let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}));
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "idconv");
}

#[test]
fn notifications_get_no_reply() {
    let server = server();
    let line = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
    assert_eq!(server.handle_line(&line), None);
    assert_eq!(server.handle_line("   "), None);
}

#[test]
fn protocol_errors_use_jsonrpc_codes() {
    let server = server();
    let parse: Value = serde_json::from_str(&server.handle_line("{not json").expect("reply"))
        .expect("reply json");
    assert_eq!(parse["error"]["code"], PARSE_ERROR);
    assert_eq!(parse["id"], Value::Null);

    let unknown = call(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "nope"}));
    assert_eq!(unknown["error"]["code"], METHOD_NOT_FOUND);

    let missing = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "convert_to", "arguments": {"ID": "abc"}}}),
    );
    assert_eq!(missing["error"]["code"], INVALID_PARAMS);
}

#[test]
fn hidden_formats_are_not_offered() {
    let server = server();
    assert!(!server.engine().encoders().contains("binary"));
    assert!(!server.engine().decoders().contains("remote-id"));

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
               "params": {"name": "convert_to",
                          "arguments": {"ID": "48656c6c6f", "DestinationFormat": "binary"}}}),
    );
    let lines = texts(&response);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Unknown encoding format binary. Use one of "), "{}", lines[0]);
    assert!(!lines[0].contains("binary,"));
}

#[test]
fn convert_to_accepts_both_argument_spellings() {
    let server = server();
    for arguments in [
        json!({"ID": "48656c6c6f", "DestinationFormat": "STRING"}),
        json!({"id": "48656c6c6f", "destination_format": "string"}),
    ] {
        let response = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "convert_to", "arguments": arguments}}),
        );
        assert_eq!(texts(&response), vec!["ID 48656c6c6f is converted from hex to string: Hello"]);
    }
}

#[test]
fn convert_satellite_id_to_hex() {
    let response = call(
        &server(),
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
               "params": {"name": "convert_to",
                          "arguments": {"ID": US1, "DestinationFormat": "hex"}}}),
    );
    let lines = texts(&response);
    assert_eq!(lines.len(), 1);
    let prefix = format!("ID {US1} is converted from base58 to hex: ");
    let hex = lines[0].strip_prefix(&prefix).expect("base58 line");
    assert_eq!(hex.len(), 64);
    assert!(hex.ends_with("00"));
}

#[test]
fn unreadable_id_lists_attempted_decoders() {
    let response = call(
        &server(),
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call",
               "params": {"name": "convert_to",
                          "arguments": {"ID": "!!!", "DestinationFormat": "nodeid"}}}),
    );
    assert_eq!(
        texts(&response),
        vec![
            "Couldn't read the source string with any of the known encodings: \
             auth-base32,base32,base58,base64,base64s,file,hex,path"
        ]
    );
}

#[test]
fn satellite_resources_are_listed_and_readable() {
    let server = server();
    let listed = call(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"}));
    let uris: Vec<&str> = listed["result"]["resources"]
        .as_array()
        .expect("resources")
        .iter()
        .map(|resource| resource["uri"].as_str().expect("uri"))
        .collect();
    assert!(uris.contains(&"storj-id://us1"));
    assert!(uris.contains(&"storj-id://saltlake"));

    let read = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 9, "method": "resources/read",
               "params": {"uri": "storj-id://us1"}}),
    );
    assert_eq!(read["result"]["contents"][0]["text"], US1);

    let unknown = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 10, "method": "resources/read",
               "params": {"uri": "storj-id://mars"}}),
    );
    assert_eq!(unknown["error"]["code"], INVALID_PARAMS);
}

#[test]
fn serve_answers_each_request_line() {
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string(),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}).to_string(),
    ]
    .join("\n");
    let mut output = Vec::new();
    server().serve(Cursor::new(input), &mut output).expect("serve");

    let output = String::from_utf8(output).expect("utf-8");
    let replies: Vec<Value> =
        output.lines().map(|line| serde_json::from_str(line).expect("reply json")).collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[1]["result"]["tools"][0]["name"], "convert_to");
}

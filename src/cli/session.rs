//! Request/response session over a single store
//!
//! Each input line is one request, tagged by `op`:
//!
//! ```json
//! {"op": "create", "key": "u1", "value": {"name": "Ann"}}
//! {"op": "read", "key": "u1"}
//! {"op": "update", "key": "u1", "value": {"name": "Annie"}}
//! {"op": "delete", "key": "u1"}
//! {"op": "list"}
//! {"op": "export", "pretty": true}
//! {"op": "clear", "delete_file": false}
//! {"op": "exit"}
//! ```
//!
//! `create` answers with the stored key and value, and `list` with every
//! record by key in both modes. `export` writes the serialized view.
//!
//! A failed request gets an error response and the session continues.
//! Only I/O failures on the session streams end it early.

use std::io::{BufRead, Write};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::observability::{log_event, Event};
use crate::persist::{self, PersistResult};
use crate::store::Store;

use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_response};

/// One session request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Create {
        #[serde(default)]
        key: Option<String>,
        value: Value,
    },
    Read {
        key: String,
    },
    Update {
        key: String,
        value: Value,
    },
    Delete {
        key: String,
    },
    List,
    Export {
        #[serde(default)]
        pretty: Option<bool>,
    },
    Clear {
        #[serde(default)]
        delete_file: bool,
    },
    Exit,
}

impl Request {
    /// Parses one request line
    pub fn parse(line: &str) -> CliResult<Self> {
        serde_json::from_str(line).map_err(|e| CliError::invalid_request(e.to_string()))
    }
}

/// Runs requests from `input` against `store` until `exit` or end of input.
///
/// Returns the number of requests handled, `exit` included.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut Store,
    config: &Config,
    input: R,
    output: &mut W,
) -> CliResult<usize> {
    let mode = store.mode().to_string();
    log_event(
        Event::SessionStart,
        &[("store", store.name()), ("mode", &mode)],
    );

    let mut handled = 0;
    for line in read_requests(input) {
        let line = line?;
        handled += 1;

        let request = match Request::parse(&line) {
            Ok(request) => request,
            Err(e) => {
                write_error(output, e.code_str(), e.message())?;
                continue;
            }
        };

        if request == Request::Exit {
            write_response(output, json!({ "exit": true }))?;
            break;
        }

        match handle(store, config, request) {
            Ok(data) => write_response(output, data)?,
            Err(e) => write_error(output, e.code(), &e.to_string())?,
        }
    }

    let exported = config.export_on_exit;
    if exported {
        persist::export(store, config.pretty_print)?;
        persist::export_schema(store)?;
    }

    log_event(
        Event::SessionEnd,
        &[
            ("store", store.name()),
            ("requests", &handled.to_string()),
            ("exported", if exported { "true" } else { "false" }),
        ],
    );

    Ok(handled)
}

fn handle(store: &mut Store, config: &Config, request: Request) -> PersistResult<Value> {
    let data = match request {
        Request::Create { key, value } => {
            let (key, value) = store.create_entry(value, key.as_deref())?;
            json!({ "key": key, "value": value })
        }
        Request::Read { key } => store.read(key)?.into_value().unwrap_or_default(),
        Request::Update { key, value } => store.update(key, value)?.into_value().unwrap_or_default(),
        Request::Delete { key } => Value::Object(store.delete(key)?),
        Request::List => Value::Object(store.records().clone()),
        Request::Export { pretty } => {
            let path = persist::export(store, pretty.unwrap_or(config.pretty_print))?;
            let schema_path = persist::export_schema(store)?;
            json!({
                "path": path.display().to_string(),
                "schema_path": schema_path.map(|p| p.display().to_string()),
            })
        }
        Request::Clear { delete_file } => {
            persist::clear(store, delete_file)?;
            json!({ "cleared": true, "deleted": delete_file })
        }
        Request::Exit => json!({ "exit": true }),
    };

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn responses(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn no_export() -> Config {
        Config {
            export_on_exit: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_parse_requests() {
        assert_eq!(Request::parse(r#"{"op":"list"}"#).unwrap(), Request::List);
        assert_eq!(
            Request::parse(r#"{"op":"create","value":1}"#).unwrap(),
            Request::Create { key: None, value: json!(1) }
        );
        assert_eq!(
            Request::parse(r#"{"op":"clear"}"#).unwrap(),
            Request::Clear { delete_file: false }
        );
        assert!(Request::parse(r#"{"op":"drop"}"#).is_err());
        assert!(Request::parse("not json").is_err());
    }

    #[test]
    fn test_crud_session() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new("users", StoreOptions::new().base_path(dir.path())).unwrap();
        let input = Cursor::new(
            [
                r#"{"op":"create","key":"u1","value":"Ann"}"#,
                r#"{"op":"create","key":"u1","value":"Dup"}"#,
                r#"{"op":"update","key":"u1","value":"Annie"}"#,
                r#"{"op":"read","key":"u1"}"#,
                r#"{"op":"read","key":"u2"}"#,
                r#"{"op":"list"}"#,
                r#"{"op":"delete","key":"u1"}"#,
                r#"{"op":"exit"}"#,
                r#"{"op":"list"}"#,
            ]
            .join("\n"),
        );

        let mut output = Vec::new();
        let handled = run_session(&mut store, &no_export(), input, &mut output).unwrap();
        assert_eq!(handled, 8);

        let out = responses(output);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0]["data"], json!({"key": "u1", "value": "Ann"}));
        assert_eq!(out[1]["code"], "JSONDB_KEY_ALREADY_EXISTS");
        assert_eq!(out[2]["data"], "Annie");
        assert_eq!(out[3]["data"], "Annie");
        assert_eq!(out[4]["code"], "JSONDB_KEY_NOT_FOUND");
        assert_eq!(out[5]["data"], json!({"u1": "Annie"}));
        assert_eq!(out[6]["data"], json!({"u1": "Annie"}));
        assert_eq!(out[7]["data"], json!({"exit": true}));
        assert!(store.is_empty());
        assert!(!store.full_file_path().exists());
    }

    #[test]
    fn test_array_keys_stay_addressable_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new("letters", StoreOptions::new().base_path(dir.path()).array())
            .unwrap();
        let input = Cursor::new(
            [
                r#"{"op":"create","value":"a"}"#,
                r#"{"op":"create","value":"b"}"#,
                r#"{"op":"create","value":"c"}"#,
                r#"{"op":"delete","key":"0"}"#,
                r#"{"op":"list"}"#,
                r#"{"op":"read","key":"1"}"#,
            ]
            .join("\n"),
        );

        let mut output = Vec::new();
        run_session(&mut store, &no_export(), input, &mut output).unwrap();

        let out = responses(output);
        assert_eq!(out[1]["data"], json!({"key": "1", "value": "b"}));
        assert_eq!(out[4]["data"], json!({"1": "b", "2": "c"}));
        assert_eq!(out[5]["data"], "b");
        assert_eq!(store.serialize(), json!(["b", "c"]));
    }

    #[test]
    fn test_invalid_request_does_not_end_session() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new("s", StoreOptions::new().base_path(dir.path())).unwrap();
        let input = Cursor::new("garbage\n{\"op\":\"list\"}\n");

        let mut output = Vec::new();
        run_session(&mut store, &no_export(), input, &mut output).unwrap();

        let out = responses(output);
        assert_eq!(out[0]["code"], "JSONDB_CLI_INVALID_REQUEST");
        assert_eq!(out[1], json!({"status": "ok", "data": {}}));
    }

    #[test]
    fn test_export_on_end_of_input() {
        let dir = TempDir::new().unwrap();
        let options = StoreOptions::new()
            .base_path(dir.path())
            .array()
            .schema(json!({"type": "number"}));
        let mut store = Store::new("scores", options).unwrap();
        let input = Cursor::new("{\"op\":\"create\",\"value\":1}\n{\"op\":\"create\",\"value\":\"x\"}\n");

        let mut output = Vec::new();
        run_session(&mut store, &Config::default(), input, &mut output).unwrap();

        let out = responses(output);
        assert_eq!(out[1]["code"], "JSONDB_SCHEMA_MISMATCH");

        let data = fs::read_to_string(dir.path().join("scores.json")).unwrap();
        assert_eq!(data, "[1]");
        assert!(dir.path().join("scores.schema.json").is_file());
    }

    #[test]
    fn test_export_and_clear_requests() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new("kv", StoreOptions::new().base_path(dir.path())).unwrap();
        let input = Cursor::new(
            [
                r#"{"op":"clear"}"#,
                r#"{"op":"create","key":"a","value":1}"#,
                r#"{"op":"export","pretty":true}"#,
                r#"{"op":"clear","delete_file":true}"#,
            ]
            .join("\n"),
        );

        let mut output = Vec::new();
        run_session(&mut store, &no_export(), input, &mut output).unwrap();

        let out = responses(output);
        assert_eq!(out[0]["code"], "JSONDB_IO_ERROR");
        assert_eq!(out[2]["data"]["schema_path"], Value::Null);
        assert_eq!(out[3]["data"], json!({"cleared": true, "deleted": true}));
        assert!(!dir.path().join("kv.json").exists());
        assert_eq!(store.len(), 1);
    }
}

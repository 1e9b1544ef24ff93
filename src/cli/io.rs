//! Line-oriented JSON I/O for sessions
//!
//! - Input: one JSON request per line, blank lines ignored
//! - Output: one JSON response per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Yields the non-blank lines of `input`
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_line(out, &json!({ "status": "ok", "data": data }))
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(
        out,
        &json!({ "status": "error", "code": code, "message": message }),
    )
}

fn write_line<W: Write>(out: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_lines_skipped() {
        let input = Cursor::new("{\"op\":\"list\"}\n\n   \n{\"op\":\"exit\"}\n");
        let lines: Vec<String> = read_requests(input).map(Result::unwrap).collect();
        assert_eq!(lines, vec!["{\"op\":\"list\"}", "{\"op\":\"exit\"}"]);
    }

    #[test]
    fn test_response_shapes() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"a": 1})).unwrap();
        write_error(&mut out, "JSONDB_KEY_NOT_FOUND", "Key not found: x").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0], json!({"status": "ok", "data": {"a": 1}}));
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["code"], "JSONDB_KEY_NOT_FOUND");
    }
}

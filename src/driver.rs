//! The `tokenize` and `parse` commands
//!
//! Both write results to `out` and diagnostics to `err`, one line per item,
//! and return the process exit status.

use crate::frontend::lexer::Scanner;
use crate::frontend::parser::Parser;
use anyhow::Result;
use log::info;
use std::io::Write;

/// Exit status when the source had scan or parse errors
pub const EXIT_DATA_ERROR: i32 = 65;

/// Print every token, or every scan error, in source order.
/// With `json`, well-formed tokens are printed as one JSON object per line.
pub fn tokenize(scanner: Scanner, json: bool, out: &mut impl Write, err: &mut impl Write) -> Result<i32> {
    info!("tokenize: start");
    let mut status = 0;
    let mut count = 0;

    for item in scanner {
        match item {
            Ok(token) if json => writeln!(out, "{}", serde_json::to_string(&token)?)?,
            Ok(token) => writeln!(out, "{}", token)?,
            Err(e) => {
                status = EXIT_DATA_ERROR;
                writeln!(err, "{}", e.report())?;
            }
        }
        count += 1;
    }

    out.flush()?;
    info!("tokenize: {} items, exit status {}", count, status);
    Ok(status)
}

/// Print each expression in canonical form until input ends or the first
/// error, which is reported with its line.
pub fn parse(scanner: Scanner, out: &mut impl Write, err: &mut impl Write) -> Result<i32> {
    info!("parse: start");
    let mut status = 0;

    for item in Parser::new(scanner) {
        match item {
            Ok(expr) => writeln!(out, "{}", expr)?,
            Err(e) => {
                status = EXIT_DATA_ERROR;
                writeln!(err, "{}", e.report())?;
                break;
            }
        }
    }

    out.flush()?;
    info!("parse: exit status {}", status);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_tokenize(source: &str, json: bool) -> (String, String, i32) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = tokenize(Scanner::new(source), json, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap(), status)
    }

    fn run_parse(source: &str) -> (String, String, i32) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = parse(Scanner::new(source), &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap(), status)
    }

    #[test]
    fn test_tokenize_dump() {
        let (out, err, status) = run_tokenize("var x = 6.25;\nprint \"hi\" != nil;", false);

        assert_eq!(
            out,
            "VAR var null\n\
             IDENTIFIER x null\n\
             EQUAL = null\n\
             NUMBER 6.25 6.25\n\
             SEMICOLON ; null\n\
             PRINT print null\n\
             STRING \"hi\" hi\n\
             BANG_EQUAL != null\n\
             NIL nil null\n\
             SEMICOLON ; null\n\
             EOF  null\n"
        );
        assert_eq!(err, "");
        assert_eq!(status, 0);
    }

    #[test]
    fn test_tokenize_errors_go_to_stderr() {
        let (out, err, status) = run_tokenize(",$\n\"open", false);

        assert_eq!(out, "COMMA , null\nEOF  null\n");
        assert_eq!(
            err,
            "[line 1] Error: Unexpected character: $\n\
             [line 2] Error: Unterminated string.\n"
        );
        assert_eq!(status, EXIT_DATA_ERROR);
    }

    #[test]
    fn test_tokenize_json() {
        let (out, _, status) = run_tokenize("42", true);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(status, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            serde_json::json!({"kind": "NUMBER", "lexeme": "42", "literal": 42.0, "start": 0, "end": 2, "line": 1})
        );
        assert_eq!(lines[1]["kind"], "EOF");
        assert_eq!(lines[1]["literal"], serde_json::Value::Null);
    }

    #[test]
    fn test_tokenize_json_identifier_carries_text() {
        let (out, _, status) = run_tokenize("orchid", true);
        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();

        assert_eq!(status, 0);
        assert_eq!(first["kind"], "IDENTIFIER");
        assert_eq!(first["literal"], "orchid");
    }

    #[test]
    fn test_parse_too_deep() {
        let (out, err, status) = run_parse(&"(".repeat(100_000));

        assert_eq!(out, "");
        assert_eq!(err, "[line 1] Error at '(': Expression nested deeper than 255 levels\n");
        assert_eq!(status, EXIT_DATA_ERROR);
    }

    #[test]
    fn test_parse_prints_each_expression() {
        let (out, err, status) = run_parse("(-1)\n\"x\" 2 * 3");

        assert_eq!(out, "(group (- 1.0))\nx\n(* 2.0 3.0)\n");
        assert_eq!(err, "");
        assert_eq!(status, 0);
    }

    #[test]
    fn test_parse_stops_at_first_error() {
        let (out, err, status) = run_parse("true\n(1\n)) 5");

        assert_eq!(out, "true\n(group 1.0)\n");
        assert_eq!(err, "[line 3] Error at ')': Expected expression\n");
        assert_eq!(status, EXIT_DATA_ERROR);
    }

    #[test]
    fn test_parse_unterminated_group() {
        let (out, err, status) = run_parse("(1");

        assert_eq!(out, "");
        assert_eq!(err, "[line 1] Error at end: Expected ')'\n");
        assert_eq!(status, EXIT_DATA_ERROR);
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(run_parse(""), (String::new(), String::new(), 0));
    }
}

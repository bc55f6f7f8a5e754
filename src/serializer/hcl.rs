use itertools::Itertools;
use serde_json::Value;

/// Quotes `text` as an HCL string literal.
///
/// Backslashes, quotes and control characters are escaped, and template
/// sequences (`${`, `%{`) are doubled so they stay literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    out.push_str(&escape_templates(&escape_body(text)));
    out.push('"');
    out
}

/// Flattens `text` onto a single line so it can follow a `#` comment marker.
///
/// Control characters become spaces, so the text never starts a new line.
pub fn comment(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn escape_body(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn escape_templates(text: &str) -> String {
    text.replace("${", "$${").replace("%{", "%%{")
}

/// Renders a JSON value as an HCL expression, indented by `indent` spaces.
///
/// JSON object syntax is valid HCL, so the pretty-printed JSON is kept as-is apart
/// from template escaping. The first line carries no indentation.
pub fn json_expression(value: &Value, indent: usize) -> String {
    // serde_json renders maps with sorted keys, so this is deterministic.
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    let pad = " ".repeat(indent);
    escape_templates(&pretty)
        .lines()
        .enumerate()
        .map(|(i, line)| if i == 0 { line.to_string() } else { format!("{}{}", pad, line) })
        .join("\n")
}

//! Flat placeholder substitution for query templates.
//!
//! Supported placeholders:
//! - `{table}` - resolved table name
//! - `{schema}` - schema the query is generated for
//! - `{execution_count}` - template counter value
//! - `{r_str}`, `{r_str1}`, `{r_str2}` - random strings
//! - `{r_int}` - random integer
//! - `{r_f}` - random float
//!
//! Unknown `{...}` tokens are copied through untouched and substituted values
//! are never scanned again.

use std::fmt::Write;

/// Values substituted into one query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderValues<'a> {
    pub table: &'a str,
    pub schema: &'a str,
    pub execution_count: i64,
    pub r_str: String,
    pub r_str1: String,
    pub r_str2: String,
    pub r_int: i64,
    pub r_f: f64,
}

impl PlaceholderValues<'_> {
    /// Write the value for `key` into `out`; false when the key is unknown.
    fn write_value(&self, key: &str, out: &mut String) -> bool {
        match key {
            "table" => out.push_str(self.table),
            "schema" => out.push_str(self.schema),
            "execution_count" => {
                let _ = write!(out, "{}", self.execution_count);
            }
            "r_str" => out.push_str(&self.r_str),
            "r_str1" => out.push_str(&self.r_str1),
            "r_str2" => out.push_str(&self.r_str2),
            "r_int" => {
                let _ = write!(out, "{}", self.r_int);
            }
            "r_f" => {
                let _ = write!(out, "{}", self.r_f);
            }
            _ => return false,
        }
        true
    }

    /// Substitute every known placeholder in `template`.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 64);
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) if self.write_value(&after[..end], &mut out) => {
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        out
    }
}

/// Replace every line break (`\r\n`, `\n` or `\r`) with a single space.
pub fn collapse_line_breaks(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }

    out
}

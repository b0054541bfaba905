// src/core/csv.rs
use std::io::{self, Write};
use std::mem::take;

/// Field separator for tabular input/output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn ch(self) -> char {
        match self {
            Delim::Csv => ',',
            Delim::Tsv => '\t',
        }
    }
    pub fn ext(self) -> &'static str {
        match self {
            Delim::Csv => "csv",
            Delim::Tsv => "tsv",
        }
    }
    /// Pick a delimiter from a file extension; anything unknown reads as CSV.
    pub fn from_ext(ext: &str) -> Delim {
        if ext.eq_ignore_ascii_case("tsv") { Delim::Tsv } else { Delim::Csv }
    }
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). std-only.
pub fn parse_rows(text: &str, delim: Delim) -> Vec<Vec<String>> {
    let sep = delim.ch();
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !row.is_empty() && !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Split the first row off as headers. The capitals table always carries one;
/// no guessing, callers that parse headerless fragments keep the rows as-is.
pub fn split_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    if rows.is_empty() { return (None, rows); }
    let headers = rows.remove(0);
    (Some(headers), rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], delim: Delim) -> io::Result<()> {
    let sep = delim.ch();
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Create a full export string from headers + rows.
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    delim: Delim,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, delim);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, delim);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields_and_crlf() {
        let text = "city,\"va,lue\"\r\nParis,\"5.0\"\r\n";
        let rows = parse_rows(text, Delim::Csv);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Paris".to_string(), "5.0".to_string()]);
        assert_eq!(rows[0][1], "va,lue");
    }

    #[test]
    fn split_headers_takes_first_row() {
        let rows = vec![
            vec![s!("city_name"), s!("month")],
            vec![s!("Paris"), s!("1950-01")],
        ];
        let (h, body) = split_headers(rows);
        assert_eq!(h.unwrap()[0], "city_name");
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn round_trips_embedded_quotes() {
        let row = vec![s!("N'Djamena"), s!("say \"hi\"")];
        let mut buf = Vec::new();
        write_row(&mut buf, &row, Delim::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let back = parse_rows(&text, Delim::Csv);
        assert_eq!(back[0], row);
    }
}

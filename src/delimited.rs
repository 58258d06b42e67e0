//! Delimited text (CSV/TSV) reading and writing.
//!
//! The reader works on the whole text rather than on split lines so quoted
//! fields may contain delimiters and line breaks. The writer quotes minimally
//! and terminates every record with `\r\n`.

use crate::error::{LayoutError, LayoutResult};
use crate::table::{Record, Table};

pub const LINE_TERMINATOR: &str = "\r\n";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Parse UTF-8 bytes into a [`Table`]. The first non-blank record is the header.
pub fn read_table_bytes(data: &[u8], delim: Delimiter) -> LayoutResult<Table> {
    let text = std::str::from_utf8(data)
        .map_err(|e| LayoutError::malformed(format!("input is not valid UTF-8: {e}")))?;
    read_table(text, delim)
}

pub fn read_table(text: &str, delim: Delimiter) -> LayoutResult<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = parse_records(text, delim.as_char())?.into_iter();

    let Some((_, header)) = records.next() else {
        return Err(LayoutError::malformed("missing header row"));
    };

    let mut table = Table::new(header);
    for (line, fields) in records {
        if fields.len() != table.header().len() {
            return Err(LayoutError::malformed(format!(
                "line {line}: expected {} fields, found {}",
                table.header().len(),
                fields.len()
            )));
        }
        table.push(Record::new(fields))?;
    }
    Ok(table)
}

/// Append one record to `out`, including the line terminator.
pub fn write_record<I, S>(out: &mut String, fields: I, delim: Delimiter)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sep = delim.as_char();
    let mut count = 0usize;
    let mut lone_empty = false;
    for (i, field) in fields.into_iter().enumerate() {
        let field = field.as_ref();
        if i > 0 {
            out.push(sep);
        }
        count += 1;
        lone_empty = i == 0 && field.is_empty();
        write_field(out, field, sep);
    }
    // A lone empty field would otherwise read back as a blank line.
    if count == 1 && lone_empty {
        out.push_str("\"\"");
    }
    out.push_str(LINE_TERMINATOR);
}

fn write_field(out: &mut String, field: &str, sep: char) {
    let needs_quotes = field
        .chars()
        .any(|c| c == sep || matches!(c, '"' | '\r' | '\n'));
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

struct RecordParser {
    records: Vec<(usize, Vec<String>)>,
    fields: Vec<String>,
    field: String,
    state: State,
    started: bool,
    line: usize,
    record_line: usize,
}

impl RecordParser {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            fields: Vec::new(),
            field: String::new(),
            state: State::FieldStart,
            started: false,
            line: 1,
            record_line: 1,
        }
    }

    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_record(&mut self) {
        if self.started {
            self.end_field();
            self.records
                .push((self.record_line, std::mem::take(&mut self.fields)));
        }
        self.state = State::FieldStart;
        self.started = false;
    }

    fn newline(&mut self) {
        self.end_record();
        self.line += 1;
        self.record_line = self.line;
    }
}

fn parse_records(text: &str, sep: char) -> LayoutResult<Vec<(usize, Vec<String>)>> {
    let mut p = RecordParser::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let is_newline = ch == '\n' || ch == '\r';
        if is_newline && p.state != State::Quoted {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            p.newline();
            continue;
        }

        p.started = true;
        match p.state {
            State::FieldStart => {
                if ch == '"' {
                    p.state = State::Quoted;
                } else if ch == sep {
                    p.end_field();
                } else {
                    p.field.push(ch);
                    p.state = State::Unquoted;
                }
            }
            State::Unquoted => {
                if ch == sep {
                    p.end_field();
                } else {
                    p.field.push(ch);
                }
            }
            State::Quoted => {
                if ch == '"' {
                    p.state = State::QuoteInQuoted;
                } else {
                    if ch == '\n' || (ch == '\r' && chars.peek() != Some(&'\n')) {
                        p.line += 1;
                    }
                    p.field.push(ch);
                }
            }
            State::QuoteInQuoted => {
                if ch == '"' {
                    p.field.push('"');
                    p.state = State::Quoted;
                } else if ch == sep {
                    p.end_field();
                } else {
                    // Text after a closing quote is kept verbatim.
                    p.field.push(ch);
                    p.state = State::Unquoted;
                }
            }
        }
    }

    if p.state == State::Quoted {
        return Err(LayoutError::malformed(format!(
            "line {}: unterminated quoted field",
            p.record_line
        )));
    }
    p.end_record();
    Ok(p.records)
}

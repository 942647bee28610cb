//! Reading the nametag roster.
//!
//! The roster is a CSV file with a header row. Header names are matched
//! case-insensitively after trimming; the recognized columns are `name`,
//! `role`, `username` and `org`. Anything else is ignored.

use crate::errors::RosterError;
use crate::slug::slugify;
use std::io::Read;
use std::path::Path;

/// One well-formed roster row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub role: String,
    pub username: Option<String>,
    pub org: Option<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        RosterEntry {
            name: name.into(),
            role: role.into(),
            username: None,
            org: None,
        }
    }

    /// Stable identifier: the username when given, else a slug of the name.
    pub fn tag_id(&self) -> String {
        match &self.username {
            Some(username) => username.clone(),
            None => slugify(&self.name),
        }
    }

    /// Organization text, falling back to `default`.
    pub fn org_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.org.as_deref().unwrap_or(default)
    }
}

/// A parsed data row: either usable, or rejected with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterRow {
    Entry(RosterEntry),
    Invalid {
        /// 1-based line in the source file
        line: u64,
        reason: &'static str,
        /// The raw cells, comma-joined, for diagnostics
        raw: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    pub rows: Vec<RosterRow>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Columns {
    name: Option<usize>,
    role: Option<usize>,
    username: Option<usize>,
    org: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = Columns::default();
        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim_start_matches('\u{feff}').trim().to_lowercase();
            let slot = match header.as_str() {
                "name" => &mut columns.name,
                "role" => &mut columns.role,
                "username" => &mut columns.username,
                "org" => &mut columns.org,
                _ => continue,
            };
            // a repeated header name refers to its last column
            *slot = Some(idx);
        }
        columns
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Drop blanks that follow a delimiter outside quoted fields, so a field
/// written as `a, "b, c"` is still read as one quoted field.
fn skip_initial_space(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quoted = false;
    let mut field_start = true;
    let mut after_delimiter = false;

    while let Some(ch) = chars.next() {
        if quoted {
            out.push(ch);
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    out.push('"');
                } else {
                    quoted = false;
                }
            }
            continue;
        }
        match ch {
            ' ' | '\t' if after_delimiter => continue,
            ',' | '\n' | '\r' => {
                out.push(ch);
                field_start = true;
                after_delimiter = ch == ',';
                continue;
            },
            '"' if field_start => quoted = true,
            _ => {},
        }
        out.push(ch);
        field_start = false;
        after_delimiter = false;
    }
    out
}

impl Roster {
    /// Open and parse the roster at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RosterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse roster CSV from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RosterError> {
        let origin = "<input>";
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| RosterError::Read {
                origin: origin.to_string(),
                source,
            })?;
        Self::parse(&text, origin)
    }

    fn parse(text: &str, origin: &str) -> Result<Self, RosterError> {
        let csv_error = |source: csv::Error| RosterError::Csv {
            origin: origin.to_string(),
            source,
        };

        let normalized = skip_initial_space(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(normalized.as_bytes());

        let columns = Columns::from_headers(reader.headers().map_err(csv_error)?);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let cell = |column: Option<usize>| {
                column
                    .and_then(|idx| record.get(idx))
                    .map(str::trim)
                    .unwrap_or("")
                    .to_string()
            };

            let name = cell(columns.name);
            let role = cell(columns.role);
            if name.is_empty() || role.is_empty() {
                rows.push(RosterRow::Invalid {
                    line: record.position().map_or(0, csv::Position::line),
                    reason: "missing name/role",
                    raw: record.iter().collect::<Vec<_>>().join(","),
                });
                continue;
            }

            rows.push(RosterRow::Entry(RosterEntry {
                name,
                role,
                username: non_empty(cell(columns.username)),
                org: non_empty(cell(columns.org)),
            }));
        }

        Ok(Roster { rows })
    }

    /// Well-formed rows, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.rows.iter().filter_map(|row| match row {
            RosterRow::Entry(entry) => Some(entry),
            RosterRow::Invalid { .. } => None,
        })
    }

    pub fn invalid_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, RosterRow::Invalid { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

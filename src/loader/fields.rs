//! Line and field helpers shared by every text data format.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::MapError;

pub fn read_file(path: &Path) -> Result<String, MapError> {
    fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits `line` on `delimiter` and trims every field.
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).map(str::trim).collect()
}

/// Teleporter and spawn files treat very short lines and `--` lines as comments.
pub fn is_comment(line: &str) -> bool {
    line.len() < 2 || line.starts_with("--") || line.trim().is_empty()
}

/// One delimited record, consumed field by field.
pub struct Record<'a> {
    path: &'a Path,
    line: usize,
    fields: std::vec::IntoIter<&'a str>,
}

impl<'a> Record<'a> {
    pub fn new(path: &'a Path, line: usize, text: &'a str, delimiter: char) -> Self {
        Record {
            path,
            line,
            fields: split_fields(text, delimiter).into_iter(),
        }
    }

    pub fn next_str(&mut self, field: &'static str) -> Result<&'a str, MapError> {
        self.fields.next().ok_or_else(|| MapError::MissingField {
            path: self.path.to_path_buf(),
            line: self.line,
            field,
        })
    }

    pub fn next_parsed<T: FromStr>(&mut self, field: &'static str) -> Result<T, MapError> {
        let raw = self.next_str(field)?;
        raw.parse().map_err(|_| MapError::InvalidField {
            path: self.path.to_path_buf(),
            line: self.line,
            field,
            value: raw.to_owned(),
        })
    }
}

use crate::ImportError;
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

/// One data record keyed by normalized header, or the reader's error for it.
pub type CsvRow = (usize, Result<HashMap<String, String>, String>);

pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Lowercase and collapse whitespace so `Owner  Email ` matches `owner email`.
    pub fn normalize_header(header: &str) -> String {
        header
            .trim_start_matches('\u{feff}')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn headers(&self, content: &str) -> Result<Vec<String>, ImportError> {
        let mut reader = self.reader(content);
        let headers = reader
            .headers()
            .map_err(|e| ImportError::ParseError(e.to_string()))?;

        Ok(headers.iter().map(Self::normalize_header).collect())
    }

    /// Returns every data record with its 1-based line number (the header is line 1).
    pub fn parse_to_maps(&self, content: &str) -> Result<Vec<CsvRow>, ImportError> {
        let headers = self.headers(content)?;
        let mut reader = self.reader(content);

        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let fallback_line = index + 2;
            match result {
                Ok(record) => {
                    let line = record
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(fallback_line);

                    if record.iter().all(|field| field.is_empty()) {
                        continue;
                    }

                    let mut map = HashMap::new();
                    for (i, field) in record.iter().enumerate() {
                        if let Some(header) = headers.get(i) {
                            map.insert(header.clone(), field.to_string());
                        }
                    }
                    rows.push((line, Ok(map)));
                }
                Err(e) => {
                    let line = e
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(fallback_line);
                    rows.push((line, Err(e.to_string())));
                }
            }
        }

        Ok(rows)
    }

    fn reader<'a>(&self, content: &'a str) -> csv::Reader<&'a [u8]> {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes())
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

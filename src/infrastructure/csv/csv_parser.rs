// ============================================================
// CSV PARSER
// ============================================================
// Split CSV text into trimmed raw rows

use csv::{ReaderBuilder, Trim};
use tracing::warn;

use crate::domain::csv::{QuoteMode, RawRow};

/// Tokenizer for uploaded CSV text
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    quote_mode: QuoteMode,
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote_mode(mut self, quote_mode: QuoteMode) -> Self {
        self.quote_mode = quote_mode;
        self
    }

    /// Parse CSV content into rows; the first row is the header by convention.
    /// Never fails: malformed quoting only shifts field boundaries.
    pub fn parse_content(&self, content: &str) -> Vec<RawRow> {
        match self.quote_mode {
            QuoteMode::Naive => content
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(Self::split_line)
                .collect(),
            QuoteMode::Rfc4180 => Self::parse_rfc4180(content),
        }
    }

    /// Split one line on commas outside quotes. Quote characters are
    /// consumed as toggles and never land in a field.
    fn split_line(line: &str) -> RawRow {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for ch in line.chars() {
            match ch {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    fields.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            }
        }

        fields.push(current.trim().to_string());
        RawRow::new(fields)
    }

    fn parse_rfc4180(content: &str) -> Vec<RawRow> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, record = index + 1, "Skipping unreadable CSV record");
                    continue;
                }
            };

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            rows.push(RawRow::new(record.iter().map(str::to_string).collect()));
        }

        rows
    }
}

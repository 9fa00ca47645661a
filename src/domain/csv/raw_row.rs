// ============================================================
// RAW ROW
// ============================================================
// One tokenized CSV line, before any schema is applied

/// Ordered, trimmed fields of a single CSV line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    /// Create a row from already-trimmed field values
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Number of fields in this row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, if the row is long enough
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field at `index`, or an empty string when the column is absent
    pub fn field(&self, index: usize) -> &str {
        self.get(index).unwrap_or("")
    }

    /// Field at `index` when present and non-empty
    pub fn non_empty(&self, index: usize) -> Option<&str> {
        self.get(index).filter(|value| !value.is_empty())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Header-style view: every field lower-cased with underscores removed
    pub fn normalized_headers(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| field.to_lowercase().replace('_', ""))
            .collect()
    }
}

impl From<Vec<String>> for RawRow {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<Vec<&str>> for RawRow {
    fn from(fields: Vec<&str>) -> Self {
        Self::new(fields.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access() {
        let row = RawRow::from(vec!["R001", "", "x"]);
        assert_eq!(row.len(), 3);
        assert_eq!(row.field(0), "R001");
        assert_eq!(row.field(9), "");
        assert_eq!(row.non_empty(1), None);
        assert_eq!(row.non_empty(2), Some("x"));
    }

    #[test]
    fn test_normalized_headers() {
        let row = RawRow::from(vec!["WO_ID", "RakeID", "Last_Cleaned"]);
        assert_eq!(row.normalized_headers(), vec!["woid", "rakeid", "lastcleaned"]);
    }
}

// ============================================================
// IMPORT OUTCOME
// ============================================================
// Report returned to the caller for one import invocation

use serde::{Deserialize, Serialize};

use super::ImportedRecord;

pub const EMPTY_FILE_ERROR: &str = "CSV file is empty or has no data rows";
pub const UNKNOWN_SCHEMA_ERROR: &str = "Unknown import type";

/// Result of processing one CSV file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// True iff at least one record was imported
    pub success: bool,

    /// Always equal to `records.len()`
    pub records_imported: usize,

    /// One entry per rejected row, or a single structural error
    pub errors: Vec<String>,

    pub warnings: Vec<String>,

    /// Validated records, in input row order
    pub records: Vec<ImportedRecord>,
}

impl ImportOutcome {
    /// Outcome for a file that produced records (or tried to)
    pub fn from_validation(
        records: Vec<ImportedRecord>,
        errors: Vec<String>,
        candidate_rows: usize,
    ) -> Self {
        let mut warnings = Vec::new();
        if records.len() < candidate_rows {
            warnings.push(format!(
                "Imported {} of {} records. Some records were skipped due to errors.",
                records.len(),
                candidate_rows
            ));
        }

        Self {
            success: !records.is_empty(),
            records_imported: records.len(),
            errors,
            warnings,
            records,
        }
    }

    /// Non-success outcome carrying a single error
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            records_imported: 0,
            errors: vec![error.into()],
            warnings: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn empty_file() -> Self {
        Self::failure(EMPTY_FILE_ERROR)
    }

    pub fn unknown_schema() -> Self {
        Self::failure(UNKNOWN_SCHEMA_ERROR)
    }

    /// Wraps a read or processing failure that escaped validation
    pub fn unexpected(message: impl std::fmt::Display) -> Self {
        Self::failure(format!("Failed to process CSV: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_warning_when_all_rows_imported() {
        let outcome = ImportOutcome::from_validation(Vec::new(), Vec::new(), 0);
        assert!(!outcome.success);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_skip_warning_text() {
        let outcome = ImportOutcome::from_validation(Vec::new(), vec!["bad".into()], 2);
        assert_eq!(
            outcome.warnings,
            vec!["Imported 0 of 2 records. Some records were skipped due to errors."]
        );
        assert_eq!(outcome.records_imported, 0);
    }

    #[test]
    fn test_failure_serializes_camel_case() {
        let json = serde_json::to_value(ImportOutcome::empty_file()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["recordsImported"], 0);
        assert_eq!(json["errors"][0], EMPTY_FILE_ERROR);
    }
}

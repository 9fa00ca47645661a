// ============================================================
// CSV IMPORT USE CASE
// ============================================================
// Orchestrate reading, tokenizing, and validating one import file

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::use_cases::import_validator::descriptor;
use crate::domain::csv::{ImportConfig, ImportOutcome, ImportSchema};
use crate::domain::error::Result;
use crate::infrastructure::csv::{BytesImportSource, CsvParser, FileImportSource, ImportSource};

/// Source of "now" for date columns left empty in the file
pub type Clock = fn() -> DateTime<Utc>;

/// CSV import use case
pub struct CsvImportUseCase {
    config: ImportConfig,
    clock: Clock,
}

impl CsvImportUseCase {
    /// Create a new import use case
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            clock: Utc::now,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(ImportConfig::default())
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// File source bound by this use case's size limit
    pub fn file_source(&self, path: &Path) -> Result<FileImportSource> {
        FileImportSource::open(path, self.config.max_file_bytes)
    }

    /// In-memory source bound by this use case's size limit
    pub fn bytes_source(&self, name: &str, bytes: impl Into<Vec<u8>>) -> BytesImportSource {
        BytesImportSource::new(name, bytes, self.config.max_file_bytes)
    }

    /// Read `source` and validate it as `schema`. Never fails: every problem
    /// ends up in the outcome's errors.
    pub async fn process_import(
        &self,
        source: &dyn ImportSource,
        schema: ImportSchema,
    ) -> ImportOutcome {
        self.process_source(source, schema.kind(), Ok(schema)).await
    }

    /// Same as [`process_import`](Self::process_import) for a schema given by name
    pub async fn process_import_kind(&self, source: &dyn ImportSource, kind: &str) -> ImportOutcome {
        self.process_source(source, kind, kind.parse()).await
    }

    /// Validate CSV text already in memory
    pub fn process_content(&self, content: &str, schema: ImportSchema) -> ImportOutcome {
        self.evaluate(content, Ok(schema))
    }

    pub fn process_content_kind(&self, content: &str, kind: &str) -> ImportOutcome {
        self.evaluate(content, kind.parse())
    }

    async fn process_source(
        &self,
        source: &dyn ImportSource,
        kind: &str,
        schema: std::result::Result<ImportSchema, String>,
    ) -> ImportOutcome {
        let import_id = Uuid::new_v4();
        let span = info_span!("csv_import", %import_id, source = source.name(), kind);

        async {
            info!("Starting CSV import");

            let content = match source.read_text().await {
                Ok(content) => content,
                Err(err) => {
                    warn!(error = %err, "Failed to read CSV import");
                    return ImportOutcome::unexpected(err.message());
                }
            };

            let outcome = self.evaluate(&content, schema);

            info!(
                success = outcome.success,
                records = outcome.records_imported,
                errors = outcome.errors.len(),
                warnings = outcome.warnings.len(),
                "CSV import finished"
            );
            outcome
        }
        .instrument(span)
        .await
    }

    fn evaluate(
        &self,
        content: &str,
        schema: std::result::Result<ImportSchema, String>,
    ) -> ImportOutcome {
        let rows = CsvParser::new()
            .with_quote_mode(self.config.quote_mode)
            .parse_content(content);

        if rows.len() < 2 {
            return ImportOutcome::empty_file();
        }

        let schema = match schema {
            Ok(schema) => schema,
            Err(_) => return ImportOutcome::unknown_schema(),
        };

        let now = (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true);
        let validation = descriptor(schema).validate(&rows, &now);

        ImportOutcome::from_validation(validation.valid, validation.errors, rows.len() - 1)
    }
}

impl Default for CsvImportUseCase {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{ImportedRecord, QuoteMode, EMPTY_FILE_ERROR, UNKNOWN_SCHEMA_ERROR};
    use chrono::TimeZone;

    const JOB_CARDS_CSV: &str = "\
WO_ID,RakeID,Description,Severity,Status,CreatedDate
WO1,R001,Brake check,critical,open,2024-01-01
WO2,R002,Paint,weird,open,2024-01-02";

    const MILEAGE_CSV: &str = "\
RakeID,TotalKM,DailyKM,TargetKM
R001,1000,50,1200
R002,abc,40,1000";

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    fn use_case() -> CsvImportUseCase {
        CsvImportUseCase::default().with_clock(fixed_clock)
    }

    #[test]
    fn test_job_cards_scenario() {
        let outcome = use_case().process_content(JOB_CARDS_CSV, ImportSchema::JobCard);

        assert!(outcome.success);
        assert_eq!(outcome.records_imported, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors, vec!["Row 3: Invalid severity \"weird\""]);
        assert_eq!(
            outcome.warnings,
            vec!["Imported 1 of 2 records. Some records were skipped due to errors."]
        );
    }

    #[test]
    fn test_mileage_scenario() {
        let outcome = use_case().process_content(MILEAGE_CSV, ImportSchema::Mileage);

        assert!(outcome.success);
        assert_eq!(outcome.records_imported, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Row 3: Invalid numeric values"));

        match &outcome.records[0] {
            ImportedRecord::Mileage(r) => assert_eq!(r.date, "2024-06-01T08:30:00.000Z"),
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_missing_columns_scenario() {
        let outcome = use_case().process_content("RakeID,Status\nR001,ok", ImportSchema::Cleaning);

        assert!(!outcome.success);
        assert_eq!(outcome.records_imported, 0);
        assert_eq!(outcome.errors, vec!["Missing required columns: lastcleaned"]);
    }

    #[test]
    fn test_header_only_is_empty_file() {
        let outcome = use_case().process_content("RakeID,LastCleaned,Status\n\n", ImportSchema::Cleaning);

        assert!(!outcome.success);
        assert_eq!(outcome.errors, vec![EMPTY_FILE_ERROR]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_blank_input_is_empty_file() {
        let outcome = use_case().process_content("  \n\r\n", ImportSchema::Mileage);
        assert_eq!(outcome, ImportOutcome::empty_file());
    }

    #[test]
    fn test_unknown_kind() {
        let outcome = use_case().process_content_kind(JOB_CARDS_CSV, "stabling");
        assert_eq!(outcome.errors, vec![UNKNOWN_SCHEMA_ERROR]);
        assert!(!outcome.success);

        // Kind names are matched exactly
        let capitalised = use_case().process_content_kind(MILEAGE_CSV, "Mileage");
        assert_eq!(capitalised.errors, vec![UNKNOWN_SCHEMA_ERROR]);

        // An empty file is reported before the kind is looked at
        let empty = use_case().process_content_kind("", "stabling");
        assert_eq!(empty.errors, vec![EMPTY_FILE_ERROR]);
    }

    #[test]
    fn test_all_rows_rejected_is_not_success() {
        let outcome = use_case().process_content(
            "RakeID,LastCleaned,Status\nR001,2024-01-01,dirty",
            ImportSchema::Cleaning,
        );

        assert!(!outcome.success);
        assert_eq!(outcome.records_imported, 0);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_row_numbers_skip_blank_lines() {
        let outcome = use_case().process_content(
            "RakeID,LastCleaned,Status\n\nR001,2024-01-01,dirty",
            ImportSchema::Cleaning,
        );

        assert_eq!(outcome.errors, vec!["Row 2: Invalid status \"dirty\""]);
    }

    #[test]
    fn test_short_rows_count_as_skipped() {
        let outcome = use_case().process_content(
            "RakeID,LastCleaned,Status\nR001,2024-01-01,completed\nR002",
            ImportSchema::Cleaning,
        );

        assert!(outcome.success);
        assert!(outcome.errors.is_empty());
        assert_eq!(
            outcome.warnings,
            vec!["Imported 1 of 2 records. Some records were skipped due to errors."]
        );
    }

    #[test]
    fn test_identical_input_gives_identical_outcome() {
        let use_case = use_case();
        let first = use_case.process_content(JOB_CARDS_CSV, ImportSchema::JobCard);
        let second = use_case.process_content(JOB_CARDS_CSV, ImportSchema::JobCard);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quote_mode_comes_from_config() {
        let csv = "RakeID,CertificateType,ValidFrom,ValidTo,Status,Remarks\n\
                   R001,Telecom,2024-01-01,2024-12-31,valid,\"see \"\"note\"\"\"";

        let naive = use_case().process_content(csv, ImportSchema::FitnessCertificate);
        let strict = CsvImportUseCase::new(ImportConfig::new().with_quote_mode(QuoteMode::Rfc4180))
            .with_clock(fixed_clock)
            .process_content(csv, ImportSchema::FitnessCertificate);

        let remarks = |outcome: &ImportOutcome| match &outcome.records[0] {
            ImportedRecord::FitnessCertificate(r) => r.remarks.clone(),
            other => panic!("unexpected record {:?}", other),
        };
        assert_eq!(remarks(&naive), "see note");
        assert_eq!(remarks(&strict), "see \"note\"");
    }

    #[tokio::test]
    async fn test_process_import_from_bytes() {
        let use_case = use_case();
        let source = use_case.bytes_source("job-cards.csv", JOB_CARDS_CSV.as_bytes().to_vec());

        let outcome = use_case.process_import(&source, ImportSchema::JobCard).await;
        assert_eq!(outcome, use_case.process_content(JOB_CARDS_CSV, ImportSchema::JobCard));
    }

    #[tokio::test]
    async fn test_process_import_kind_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mileage.csv");
        std::fs::write(&path, MILEAGE_CSV).unwrap();

        let use_case = use_case();
        let source = use_case.file_source(&path).unwrap();
        let outcome = use_case.process_import_kind(&source, "mileage").await;

        assert_eq!(outcome.records_imported, 1);
    }

    #[tokio::test]
    async fn test_read_failure_becomes_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = use_case();
        let source = use_case.file_source(&dir.path().join("missing.csv")).unwrap();

        let outcome = use_case.process_import(&source, ImportSchema::Mileage).await;

        assert!(!outcome.success);
        assert_eq!(outcome.records_imported, 0);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Failed to process CSV: Failed to open file"));
    }

    #[tokio::test]
    async fn test_oversized_upload_becomes_outcome() {
        let use_case = CsvImportUseCase::new(ImportConfig::new().with_max_file_bytes(8));
        let source = use_case.bytes_source("mileage.csv", MILEAGE_CSV.as_bytes().to_vec());

        let outcome = use_case.process_import(&source, ImportSchema::Mileage).await;
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("limit is 8 bytes"));
    }
}

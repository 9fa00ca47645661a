// ============================================================
// CSV IMPORT DOMAIN LAYER
// ============================================================
// Core types and value objects for fleet CSV imports
// No I/O, no async

mod import_config;
mod import_outcome;
mod import_schema;
mod imported_record;
mod raw_row;

pub use import_config::{ImportConfig, QuoteMode};
pub use import_outcome::{ImportOutcome, EMPTY_FILE_ERROR, UNKNOWN_SCHEMA_ERROR};
pub use import_schema::ImportSchema;
pub use imported_record::{
    BrandingPriority, BrandingRecord, CleaningRecord, CleaningStatus, FitnessCertificateRecord,
    ImportedRecord, JobCardRecord, JobSeverity, JobStatus, MileageRecord,
};
pub use raw_row::RawRow;

// ============================================================
// IMPORT VALIDATOR
// ============================================================
// Header and row checks for each import schema

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::csv::{
    BrandingPriority, BrandingRecord, CleaningRecord, CleaningStatus, FitnessCertificateRecord,
    ImportSchema, ImportedRecord, JobCardRecord, JobSeverity, JobStatus, MileageRecord, RawRow,
};

/// Leading decimal number, the way spreadsheet-ish inputs are read leniently
static LEADING_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Builds a record from a row that already has enough columns.
/// `Err` carries the reason without the row prefix.
type RecordBuilder = fn(&RawRow, &str) -> Result<ImportedRecord, String>;

/// Per-schema rules driving the shared row validator
pub struct SchemaDescriptor {
    pub schema: ImportSchema,

    /// Fragments that must each appear in some normalized header field
    pub required_fields: &'static [&'static str],

    /// Shorter rows are skipped without an error
    pub min_columns: usize,

    build: RecordBuilder,
}

/// Records and errors produced by one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaValidation {
    pub valid: Vec<ImportedRecord>,
    pub errors: Vec<String>,
}

static DESCRIPTORS: [SchemaDescriptor; 5] = [
    SchemaDescriptor {
        schema: ImportSchema::FitnessCertificate,
        required_fields: &["rakeid", "certificatetype", "validfrom", "validto", "status"],
        min_columns: 5,
        build: build_fitness_certificate,
    },
    SchemaDescriptor {
        schema: ImportSchema::JobCard,
        required_fields: &["woid", "rakeid", "description", "severity", "status"],
        min_columns: 5,
        build: build_job_card,
    },
    SchemaDescriptor {
        schema: ImportSchema::Mileage,
        required_fields: &["rakeid", "totalkm", "dailykm", "targetkm"],
        min_columns: 4,
        build: build_mileage,
    },
    SchemaDescriptor {
        schema: ImportSchema::Branding,
        required_fields: &["rakeid", "brandid", "requiredhours", "deliveredhours", "priority"],
        min_columns: 5,
        build: build_branding,
    },
    SchemaDescriptor {
        schema: ImportSchema::Cleaning,
        required_fields: &["rakeid", "lastcleaned", "status"],
        min_columns: 3,
        build: build_cleaning,
    },
];

/// Rules for `schema`
pub fn descriptor(schema: ImportSchema) -> &'static SchemaDescriptor {
    match schema {
        ImportSchema::FitnessCertificate => &DESCRIPTORS[0],
        ImportSchema::JobCard => &DESCRIPTORS[1],
        ImportSchema::Mileage => &DESCRIPTORS[2],
        ImportSchema::Branding => &DESCRIPTORS[3],
        ImportSchema::Cleaning => &DESCRIPTORS[4],
    }
}

impl SchemaDescriptor {
    /// Required fragments with no matching header field, in declaration order
    pub fn missing_fields(&self, header: &RawRow) -> Vec<&'static str> {
        let headers = header.normalized_headers();
        self.required_fields
            .iter()
            .copied()
            .filter(|field| {
                let fragment = field.replace('_', "");
                !headers.iter().any(|h| h.contains(&fragment))
            })
            .collect()
    }

    /// Validate `rows` (header first). `now` fills absent date columns.
    pub fn validate(&self, rows: &[RawRow], now: &str) -> SchemaValidation {
        let mut result = SchemaValidation::default();

        let Some(header) = rows.first() else {
            return result;
        };

        let missing = self.missing_fields(header);
        if !missing.is_empty() {
            result
                .errors
                .push(format!("Missing required columns: {}", missing.join(", ")));
            return result;
        }

        for (index, row) in rows.iter().enumerate().skip(1) {
            if row.len() < self.min_columns {
                continue;
            }

            match (self.build)(row, now) {
                Ok(record) => result.valid.push(record),
                Err(reason) => result.errors.push(format!("Row {}: {}", index + 1, reason)),
            }
        }

        result
    }
}

/// Lenient number read: leading numeric prefix, `None` when there is none
pub fn parse_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_PATTERN
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn parse_finite(value: &str) -> Option<f64> {
    parse_number(value).filter(|n| n.is_finite())
}

fn build_fitness_certificate(row: &RawRow, _now: &str) -> Result<ImportedRecord, String> {
    let rake_id = row.field(0);
    let certificate_type = row.field(1);
    if rake_id.is_empty() || certificate_type.is_empty() {
        return Err("Missing rake ID or certificate type".to_string());
    }

    Ok(ImportedRecord::FitnessCertificate(FitnessCertificateRecord {
        rake_id: rake_id.to_string(),
        certificate_type: certificate_type.to_string(),
        valid_from: row.field(2).to_string(),
        valid_to: row.field(3).to_string(),
        status: row.field(4).to_lowercase(),
        remarks: row.field(5).to_string(),
    }))
}

fn build_job_card(row: &RawRow, now: &str) -> Result<ImportedRecord, String> {
    let severity = JobSeverity::parse(row.field(3))
        .ok_or_else(|| format!("Invalid severity \"{}\"", row.field(3)))?;
    let status = JobStatus::parse(row.field(4))
        .ok_or_else(|| format!("Invalid status \"{}\"", row.field(4)))?;

    Ok(ImportedRecord::JobCard(JobCardRecord {
        wo_id: row.field(0).to_string(),
        rake_id: row.field(1).to_string(),
        description: row.field(2).to_string(),
        severity,
        status,
        created_date: row.non_empty(5).unwrap_or(now).to_string(),
    }))
}

fn build_mileage(row: &RawRow, now: &str) -> Result<ImportedRecord, String> {
    let values: Vec<(&str, Option<f64>)> = (1..=3)
        .map(|idx| (row.field(idx), parse_finite(row.field(idx))))
        .collect();

    let invalid: Vec<String> = values
        .iter()
        .filter(|(_, parsed)| parsed.is_none())
        .map(|(raw, _)| format!("\"{}\"", raw))
        .collect();
    if !invalid.is_empty() {
        return Err(format!("Invalid numeric values {}", invalid.join(", ")));
    }

    let number = |idx: usize| values[idx].1.unwrap_or_default();
    Ok(ImportedRecord::Mileage(MileageRecord {
        rake_id: row.field(0).to_string(),
        total_km: number(0),
        daily_km: number(1),
        target_km: number(2),
        date: row.non_empty(4).unwrap_or(now).to_string(),
    }))
}

fn build_branding(row: &RawRow, _now: &str) -> Result<ImportedRecord, String> {
    let priority = BrandingPriority::parse(row.field(4))
        .ok_or_else(|| format!("Invalid priority \"{}\"", row.field(4)))?;

    Ok(ImportedRecord::Branding(BrandingRecord {
        rake_id: row.field(0).to_string(),
        brand_id: row.field(1).to_string(),
        required_hours: parse_number(row.field(2)),
        delivered_hours: parse_number(row.field(3)),
        priority,
    }))
}

fn build_cleaning(row: &RawRow, _now: &str) -> Result<ImportedRecord, String> {
    let status = CleaningStatus::parse(row.field(2))
        .ok_or_else(|| format!("Invalid status \"{}\"", row.field(2)))?;

    Ok(ImportedRecord::Cleaning(CleaningRecord {
        rake_id: row.field(0).to_string(),
        last_cleaned: row.field(1).to_string(),
        status,
    }))
}

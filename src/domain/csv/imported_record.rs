// ============================================================
// IMPORTED RECORDS
// ============================================================
// Typed records produced from rows that passed validation

use serde::{Deserialize, Serialize};

use super::ImportSchema;

/// Defines a lower-case string enum with a case-insensitive parser.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parse a raw CSV value, ignoring case
            pub fn parse(value: &str) -> Option<Self> {
                match value.to_lowercase().as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Work order severity
    JobSeverity {
        Critical => "critical",
        Major => "major",
        Minor => "minor",
    }
);

string_enum!(
    JobStatus {
        Open => "open",
        Closed => "closed",
        Pending => "pending",
    }
);

string_enum!(
    BrandingPriority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

string_enum!(
    CleaningStatus {
        Completed => "completed",
        Pending => "pending",
        Overdue => "overdue",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessCertificateRecord {
    pub rake_id: String,
    pub certificate_type: String,
    pub valid_from: String,
    pub valid_to: String,
    /// Lower-cased as imported, not checked against a fixed set
    pub status: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardRecord {
    pub wo_id: String,
    pub rake_id: String,
    pub description: String,
    pub severity: JobSeverity,
    pub status: JobStatus,
    pub created_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageRecord {
    pub rake_id: String,
    pub total_km: f64,
    pub daily_km: f64,
    pub target_km: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingRecord {
    pub rake_id: String,
    pub brand_id: String,
    /// `None` when the cell held no leading number
    pub required_hours: Option<f64>,
    pub delivered_hours: Option<f64>,
    pub priority: BrandingPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningRecord {
    pub rake_id: String,
    pub last_cleaned: String,
    pub status: CleaningStatus,
}

/// One validated data row, tagged by the schema it was imported under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ImportedRecord {
    #[serde(rename = "fitness-certificates", alias = "fitness-certificate")]
    FitnessCertificate(FitnessCertificateRecord),
    #[serde(rename = "job-cards", alias = "job-card")]
    JobCard(JobCardRecord),
    Mileage(MileageRecord),
    Branding(BrandingRecord),
    Cleaning(CleaningRecord),
}

impl ImportedRecord {
    pub fn schema(&self) -> ImportSchema {
        match self {
            ImportedRecord::FitnessCertificate(_) => ImportSchema::FitnessCertificate,
            ImportedRecord::JobCard(_) => ImportSchema::JobCard,
            ImportedRecord::Mileage(_) => ImportSchema::Mileage,
            ImportedRecord::Branding(_) => ImportSchema::Branding,
            ImportedRecord::Cleaning(_) => ImportSchema::Cleaning,
        }
    }
}

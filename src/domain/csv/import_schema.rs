// ============================================================
// IMPORT SCHEMA
// ============================================================
// Selects which columns and checks apply to an uploaded CSV

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of fleet data carried by an import file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportSchema {
    /// Fitness certificates issued per rake
    #[serde(rename = "fitness-certificates", alias = "fitness-certificate")]
    FitnessCertificate,

    /// Maintenance work orders exported from Maximo
    #[serde(rename = "job-cards", alias = "job-card")]
    JobCard,

    #[serde(rename = "mileage")]
    Mileage,

    /// Advertising wrap exposure commitments
    #[serde(rename = "branding")]
    Branding,

    #[serde(rename = "cleaning")]
    Cleaning,
}

impl ImportSchema {
    pub const ALL: [ImportSchema; 5] = [
        ImportSchema::FitnessCertificate,
        ImportSchema::JobCard,
        ImportSchema::Mileage,
        ImportSchema::Branding,
        ImportSchema::Cleaning,
    ];

    /// Wire name used by the dashboard and the HTTP API
    pub fn kind(&self) -> &'static str {
        match self {
            ImportSchema::FitnessCertificate => "fitness-certificates",
            ImportSchema::JobCard => "job-cards",
            ImportSchema::Mileage => "mileage",
            ImportSchema::Branding => "branding",
            ImportSchema::Cleaning => "cleaning",
        }
    }

    /// Get human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ImportSchema::FitnessCertificate => "Fitness Certificates",
            ImportSchema::JobCard => "Job Cards (Maximo)",
            ImportSchema::Mileage => "Mileage Data",
            ImportSchema::Branding => "Branding Priorities",
            ImportSchema::Cleaning => "Cleaning Status",
        }
    }

    /// Header line offered to users as a downloadable starting point
    pub fn template(&self) -> &'static str {
        match self {
            ImportSchema::FitnessCertificate => {
                "RakeID,CertificateType,ValidFrom,ValidTo,Status,Remarks"
            }
            ImportSchema::JobCard => "WO_ID,RakeID,Description,Severity,Status,CreatedDate",
            ImportSchema::Mileage => "RakeID,TotalKM,DailyKM,TargetKM,Date",
            ImportSchema::Branding => "RakeID,BrandID,RequiredHours,DeliveredHours,Priority",
            ImportSchema::Cleaning => "RakeID,LastCleaned,Status",
        }
    }

    pub fn template_file_name(&self) -> String {
        format!("{}_template.csv", self.kind())
    }
}

impl std::fmt::Display for ImportSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

impl FromStr for ImportSchema {
    type Err = String;

    /// Names are matched exactly; no trimming or case folding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fitness-certificates" | "fitness-certificate" => Ok(ImportSchema::FitnessCertificate),
            "job-cards" | "job-card" => Ok(ImportSchema::JobCard),
            "mileage" => Ok(ImportSchema::Mileage),
            "branding" => Ok(ImportSchema::Branding),
            "cleaning" => Ok(ImportSchema::Cleaning),
            other => Err(format!("Unknown import type: {}", other)),
        }
    }
}

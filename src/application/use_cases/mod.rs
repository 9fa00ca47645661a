pub mod csv_import;
pub mod import_validator;

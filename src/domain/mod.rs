pub mod error;

// CSV import module
pub mod csv;

// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV tokenizing, encoding detection, and file sources

mod csv_parser;
mod source;

pub use csv_parser::CsvParser;
pub use source::{
    decode_bytes, ensure_csv_file_name, BytesImportSource, FileImportSource, ImportSource,
};

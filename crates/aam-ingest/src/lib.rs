pub mod csv_import;
pub mod error;

pub use csv_import::{
    CsvImport, experiment_name_from_file, import_csv_path, import_csv_reader, import_csv_str,
    rows_to_table,
};
pub use error::{IngestError, Result};

//! Text exports of an experiment table.

pub mod csv_export;
pub mod latex;

pub use csv_export::{csv_file_name, table_to_csv, write_csv_file};
pub use latex::table_to_latex;

pub mod compare;
pub mod csv_writer;
pub mod table;

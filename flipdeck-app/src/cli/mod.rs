pub mod commands;
pub mod csv_io;
pub mod opts;

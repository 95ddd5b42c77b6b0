// Input and output collaborators of the pipeline
pub mod csv_parser;
pub mod xlsx_writer;

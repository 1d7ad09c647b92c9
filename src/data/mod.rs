//! Dataset ingestion and serialization layer.

pub mod reader;
pub mod table;
pub mod writer;

pub use reader::load_table;
pub use table::Table;
pub use writer::write_table;

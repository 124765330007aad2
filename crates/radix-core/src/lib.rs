pub mod decomp;
pub mod query;
pub mod settings;
pub mod table;
pub mod unicode;

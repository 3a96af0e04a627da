mod document;
mod row;

pub use document::Document;
pub use row::Row;

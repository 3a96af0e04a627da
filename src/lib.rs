//! gkilo - 帶語法高亮和增量搜索的小型終端文字編輯器

pub mod buffer;
pub mod config;
pub mod context;
pub mod cursor;
pub mod dialog;
pub mod editor;
pub mod highlight;
pub mod input;
pub mod message;
pub mod render;
pub mod search;
pub mod terminal;
pub mod utils;
pub mod view;

// 重新導出常用類型
pub use buffer::{Document, Row};
pub use context::Context;
pub use cursor::Cursor;
pub use highlight::{Highlight, SyntaxProfile};
pub use search::{Search, SearchKey};

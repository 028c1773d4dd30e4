// Utils compartidos

pub mod constants;
pub mod csv_export;
pub mod html;
pub mod storage;

pub use constants::*;
pub use csv_export::rows_to_csv;
pub use html::{escape_attr, escape_html};
pub use storage::{KeyValueStore, MemoryStorage};

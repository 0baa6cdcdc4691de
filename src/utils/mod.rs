pub mod table;
pub mod errors;

pub use table::{Align, Table};

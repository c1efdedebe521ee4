pub mod reference;
pub mod rewrite;

pub use reference::{CellRef, Delta};
pub use rewrite::rewrite_value;

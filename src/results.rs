mod result_set;
mod row;
mod selection;

pub use result_set::ResultSet;
pub use row::CustomDbRow;
pub use selection::Selection;

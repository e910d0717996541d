//! Input parsing: the clause file and the optional literal-ordering file.

pub mod clauses;
pub mod ordering;

pub use clauses::{parse_input, ParsedInput};
pub use ordering::parse_ordering;

//! Optional pre-saturation simplification: unit propagation and purity
//! deletion. Either step can shrink the parsed clause set; unit propagation
//! can derive the empty clause on its own.

pub mod purity;
pub mod unit_propagation;

pub use purity::purity_deletion;
pub use unit_propagation::unit_propagation;

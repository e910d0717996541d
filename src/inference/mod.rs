//! The inference engine: the resolution rules and the subsumption passes.

pub mod resolution;
pub mod subsumption;

pub use resolution::resolve;
pub use subsumption::{
    backward_subsumption, initial_self_subsumption, self_subsumption, sort_clause_list,
    subsumption,
};

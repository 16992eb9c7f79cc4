//! Query construction: keyword expansion, clause assembly and search URLs.

mod builder;
mod mapping;

pub use builder::QueryBuilder;
pub use mapping::TermMapping;

pub mod domain;
pub mod error;
pub mod grouping;
pub mod protocol;

pub use grouping::{group_by, group_by_key, Fields, Grouped, Selector};

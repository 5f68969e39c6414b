pub mod creation;
pub mod hierarchy;
pub mod query;

pub mod mutators;
pub mod remote;
pub mod selectors;
pub mod spec;

pub mod form;
pub mod provision;
pub mod workflow;

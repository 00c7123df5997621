pub mod extract;
pub mod fetch;
pub mod grading;
pub mod output;
pub mod pdf;

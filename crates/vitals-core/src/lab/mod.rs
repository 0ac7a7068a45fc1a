pub mod engine;
pub mod outcome;

pub use engine::evaluate;
pub use outcome::{LabReport, TestResult, TestStatus};

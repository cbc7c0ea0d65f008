pub mod context;
pub mod runner;
pub mod spec_model;

pub use runner::TestRunner;
pub use spec_model::{AssertionSpec, Target, TestResult, TestSpec, TestStep};

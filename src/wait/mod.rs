pub mod policy;
pub mod stabilize;

pub use policy::{WaitConfig, WaitPolicy};
pub use stabilize::{ElementState, settle, wait_for, wait_for_any, wait_for_enabled, wait_for_options, wait_for_stable_count, wait_for_url};

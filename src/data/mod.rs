pub mod export;
pub mod fixtures;
pub mod generate;
pub mod scratch;
pub mod upload;

pub use fixtures::{Fixtures, fill_dynamic};
pub use scratch::ScratchStore;

pub mod assertion;

pub use assertion::{Expectation, expect_url, expect_url_eq};

/// Default deadline for retrying assertions.
pub const DEFAULT_EXPECT_TIMEOUT_MS: u64 = 5_000;

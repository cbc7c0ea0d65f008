pub mod locator;
pub mod mock;
pub mod page;
pub mod preflight;
pub mod protocol;
pub mod session;

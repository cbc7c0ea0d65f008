//! Locator tables, one per screen. Fixed locators are plain functions;
//! parameterized ones take the value they are keyed on.

pub mod invoice;
pub mod job;
pub mod navigation;
pub mod organization;
pub mod project;
pub mod property;

//! ELearn test harness core
//!
//! Reusable pieces behind the browser-driven CRUD workflows:
//! - fixture loading (CSV vocabulary, JSON content catalog)
//! - randomized entity generation with Vietnamese-to-ASCII folding
//! - form synchronization against re-rendered containers
//! - field-by-field verification of rendered rows
//!
//! Browser control itself sits behind the [`driver::PageDriver`] trait;
//! this crate never owns a session.

pub mod driver;
pub mod error;
pub mod fixture;
pub mod fold;
pub mod form;
pub mod generate;
pub mod verify;

pub use driver::{PageDriver, WaitState};
pub use error::{HarnessError, HarnessResult};
pub use fixture::{ContentCatalog, ContentItem, Vocabulary};
pub use generate::{Gender, PersonRecord};

//! End-to-end CRUD workflows for the e-learning admin UI
//!
//! Two independent workflows, both driver-generic:
//! - student record management: create → verify → edit → verify → delete
//!   → verify absent
//! - course content authoring: add a chapter and two lessons, save, verify
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ workflows (student, course)                            │
//! │   └── elearn-harness: fixtures, generation, form sync  │
//! │         └── PageDriver ── real browser  or  SimUi      │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The runner binary (`tests/e2e.rs`, `harness = false`) executes both
//! against the in-memory [`sim::SimUi`] and writes a JSON report.

pub mod course;
pub mod locators;
pub mod report;
pub mod session;
pub mod sim;
pub mod student;

pub use course::{CourseOutcome, CourseWorkflow};
pub use report::{SuiteReport, WorkflowReport};
pub use session::{Session, SessionConfig, WorkflowConfig};
pub use sim::SimUi;
pub use student::{Stage, StudentWorkflow};

//! Browser automation driver seam
//!
//! The harness never talks to a real DOM directly; everything goes through
//! [`PageDriver`]. A production implementation wraps a WebDriver session,
//! the test suite uses an in-memory simulated page. Execution is
//! single-threaded and blocking: each wait blocks until the condition is
//! met or the bounded timeout expires.

use std::time::Duration;

use crate::error::HarnessResult;

/// What a bounded wait should observe before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Visible,
    Hidden,
    Present,
    Absent,
}

/// Synchronous, blocking handle to a rendered page.
///
/// `Handle` values are opaque element references in document order;
/// `find_all` returns them in that order, which the form helper relies on
/// when it selects the last visible candidate.
pub trait PageDriver {
    type Handle: Clone;

    /// Navigate the session to a page of the system under test.
    fn goto(&mut self, url: &str) -> HarnessResult<()>;

    /// All elements matching the selector, in document order.
    fn find_all(&self, selector: &str) -> HarnessResult<Vec<Self::Handle>>;

    fn is_visible(&self, handle: &Self::Handle) -> HarnessResult<bool>;

    fn attr(&self, handle: &Self::Handle, name: &str) -> HarnessResult<Option<String>>;

    fn value_of(&self, handle: &Self::Handle) -> HarnessResult<String>;

    fn text_of(&self, handle: &Self::Handle) -> HarnessResult<String>;

    /// Clear the element's value in full (select-all + delete, not a
    /// partial overwrite).
    fn clear(&mut self, handle: &Self::Handle) -> HarnessResult<()>;

    /// Write the value property without notifying the page.
    fn set_value(&mut self, handle: &Self::Handle, value: &str) -> HarnessResult<()>;

    /// Dispatch a bubbling `input` event so reactive frameworks observe
    /// the write.
    fn dispatch_input(&mut self, handle: &Self::Handle) -> HarnessResult<()>;

    fn click(&mut self, handle: &Self::Handle) -> HarnessResult<()>;

    /// Block until the selector reaches the given state or the timeout
    /// expires with [`HarnessError::Timeout`].
    ///
    /// [`HarnessError::Timeout`]: crate::error::HarnessError::Timeout
    fn wait_for(
        &mut self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> HarnessResult<()>;

    /// Tear down the browser session. Must be safe to call twice.
    fn quit(&mut self) -> HarnessResult<()>;
}

//! Renderer abstraction for the display surface.

#[cfg(any(test, feature = "testing"))]
#[cfg(feature = "no_std")]
use alloc::vec::Vec;

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// A display surface that props can be rendered onto.
///
/// Implement this to connect the counter to whatever actually draws it
/// (console, terminal UI, embedded display). [`render`](Self::render) is
/// called with fresh props on mount and after every state change.
///
/// # Example
///
/// ```rust
/// use tally::{CounterProps, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<CounterProps> for ConsoleRenderer {
///     fn render(&mut self, props: CounterProps) {
///         println!("{}", props.heading);
///     }
/// }
/// ```
pub trait Renderer<Props> {
    /// Render the given props.
    fn render(&mut self, props: Props);
}

#[cfg(any(test, feature = "testing"))]
/// Capture renderer for tests.
///
/// Only available with the `testing` feature or during tests. Records every
/// rendered `Props` so assertions can inspect them. Clones share the same
/// capture storage, so one clone can be mounted while another inspects.
///
/// Props callbacks that trigger a re-render must not be invoked inside the
/// [`with_renders`](Self::with_renders) closure; the re-render would need the
/// same capture lock. Drain them out with
/// [`take_renders`](Self::take_renders) first and invoke from there.
pub struct TestRenderer<Props> {
    renders: Arc<Mutex<Vec<Props>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for TestRenderer<Props> {
    fn render(&mut self, props: Props) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props: Send + 'static> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props: Send + 'static> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of renders captured so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Inspect the captured renders with a closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Props>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }

    /// Remove and return everything captured so far.
    ///
    /// Use this to get owned `Props` whose callbacks can be invoked without
    /// holding the capture lock. Renders triggered afterwards are captured
    /// from index 0 again.
    pub fn take_renders(&self) -> Vec<Props> {
        core::mem::take(&mut *self.renders.lock())
    }
}

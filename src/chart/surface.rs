//! Drawing surfaces: where rendered markup lands.

use std::cell::RefCell;
use std::rc::Rc;

/// A container the chart is drawn into.
pub trait ChartSurface {
    /// Current container width in pixels.
    fn width(&self) -> u32;

    /// Replace the container contents with `markup`.
    fn present(&mut self, markup: &str);

    /// Empty the container.
    fn clear(&mut self);
}

#[derive(Debug, Default)]
struct MemorySurfaceInner {
    width: u32,
    markup: Option<String>,
    presents: usize,
}

/// In-memory surface for headless rendering and tests.
///
/// Clones share the same buffer, so a caller can keep a handle after giving
/// one to a [`ChartHost`](super::ChartHost).
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    inner: Rc<RefCell<MemorySurfaceInner>>,
}

impl MemorySurface {
    pub fn new(width: u32) -> Self {
        let surface = Self::default();
        surface.set_width(width);
        surface
    }

    /// Simulate the container changing size.
    pub fn set_width(&self, width: u32) {
        self.inner.borrow_mut().width = width;
    }

    pub fn markup(&self) -> Option<String> {
        self.inner.borrow().markup.clone()
    }

    /// Number of times markup was presented.
    pub fn present_count(&self) -> usize {
        self.inner.borrow().presents
    }
}

impl ChartSurface for MemorySurface {
    fn width(&self) -> u32 {
        self.inner.borrow().width
    }

    fn present(&mut self, markup: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.markup = Some(markup.to_string());
        inner.presents += 1;
    }

    fn clear(&mut self) {
        self.inner.borrow_mut().markup = None;
    }
}

//! Viewport resize notifications with scoped listener registration.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Something that reports when the visible area changes size.
pub trait Viewport {
    /// Register `listener`; it stays registered until the guard is dropped.
    fn on_resize(&self, listener: Box<dyn Fn()>) -> ListenerGuard;
}

/// Deregisters a listener when dropped.
#[must_use = "dropping the guard immediately removes the listener"]
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn()>)>,
}

/// A viewport whose resizes are triggered by hand.
///
/// Native hosts drive it from their own window events; tests call
/// [`ManualViewport::notify_resize`].
#[derive(Clone, Default)]
pub struct ManualViewport {
    registry: Rc<RefCell<Registry>>,
}

impl ManualViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every registered listener.
    pub fn notify_resize(&self) {
        // Snapshot so listeners may (de)register while being called.
        let listeners: Vec<Rc<dyn Fn()>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl Viewport for ManualViewport {
    fn on_resize(&self, listener: Box<dyn Fn()>) -> ListenerGuard {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        ListenerGuard::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

//! DOM-backed chart surface, window viewport, and event listener guards.

use crate::chart::{ChartSurface, ListenerGuard, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, Window};

/// Register `handler` for `event` on `target`; the guard removes it again.
pub(crate) fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<ListenerGuard, JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;

    let target = target.clone();
    Ok(ListenerGuard::new(move || {
        if let Err(err) =
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            tracing::error!("Failed to remove {} listener: {}", event, js_error(&err));
        }
    }))
}

/// Draws into an element's inner HTML and measures its client width.
pub struct ElementSurface {
    element: Element,
}

impl ElementSurface {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl ChartSurface for ElementSurface {
    fn width(&self) -> u32 {
        self.element.client_width().max(0) as u32
    }

    fn present(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn clear(&mut self) {
        self.element.set_inner_html("");
    }
}

/// Browser window `resize` events.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn on_resize(&self, listener: Box<dyn Fn()>) -> ListenerGuard {
        match listen(&self.window, "resize", move |_| listener()) {
            Ok(guard) => guard,
            Err(err) => {
                tracing::error!("Failed to register resize listener: {}", js_error(&err));
                ListenerGuard::noop()
            }
        }
    }
}

/// Best-effort readable text for a thrown JS value.
pub(crate) fn js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        let name = error.name().as_string().unwrap_or_else(|| "Error".to_string());
        let message = error.message().as_string().unwrap_or_default();
        return if message.is_empty() {
            name
        } else {
            format!("{name}: {message}")
        };
    }

    if let Some(s) = err.as_string() {
        return s;
    }

    format!("{err:?}")
}

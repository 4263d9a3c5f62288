//! The dashboard page: address field, trigger, banners, chart.
//!
//! Single-threaded: all state lives behind `RefCell`s in one `Rc<App>`, kept
//! in a `thread_local!` slot between mount and unmount.

use super::dom::{js_error, listen, ElementSurface, WindowViewport};
use crate::chart::{ChartHost, ListenerGuard, SvgCandlestickChart};
use crate::client::CoinGeckoClient;
use crate::dashboard::Dashboard;

use futures_util::future::{AbortHandle, Abortable};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

const TITLE: &str = "Crypto Trading Vision";
const TRIGGER_LABEL: &str = "Fetch Data";
const LOADING_LABEL: &str = r#"<span class="tc-spinner" aria-hidden="true"></span>Loading..."#;

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

type MountedChart = ChartHost<SvgCandlestickChart, ElementSurface>;

struct Nodes {
    root: Element,
    input: HtmlInputElement,
    button: HtmlButtonElement,
    banner: HtmlElement,
    error: HtmlElement,
    chart_panel: HtmlElement,
    chart: Element,
}

impl Nodes {
    fn build(document: &Document, container: &Element) -> Result<Self, JsValue> {
        let root = element(document, "div", "token-candles")?;
        let heading = element(document, "h1", "tc-title")?;
        heading.set_text_content(Some(TITLE));
        let form = element(document, "div", "tc-form")?;

        let input: HtmlInputElement = element(document, "input", "tc-address")?
            .dyn_into()
            .map_err(JsValue::from)?;
        input.set_type("text");
        input.set_placeholder("Enter token address");

        let button: HtmlButtonElement = element(document, "button", "tc-trigger")?
            .dyn_into()
            .map_err(JsValue::from)?;
        button.set_type("button");
        button.set_text_content(Some(TRIGGER_LABEL));

        let banner = html_element(document, "div", "tc-banner")?;
        let error = html_element(document, "p", "tc-error")?;
        let chart_panel = html_element(document, "div", "tc-chart-panel")?;
        let chart = element(document, "div", "tc-chart")?;
        chart.set_attribute("style", "width: 100%")?;

        root.append_child(&heading)?;
        form.append_child(&input)?;
        form.append_child(&button)?;
        root.append_child(&form)?;
        root.append_child(&banner)?;
        root.append_child(&error)?;
        chart_panel.append_child(&chart)?;
        root.append_child(&chart_panel)?;
        container.append_child(&root)?;

        Ok(Self {
            root,
            input,
            button,
            banner,
            error,
            chart_panel,
            chart,
        })
    }
}

struct App {
    client: CoinGeckoClient,
    window: Window,
    nodes: Nodes,
    dashboard: RefCell<Dashboard>,
    /// Mounted chart, tagged with the dashboard revision it shows.
    chart: RefCell<Option<(u64, MountedChart)>>,
    in_flight: RefCell<Option<AbortHandle>>,
    listeners: RefCell<Vec<ListenerGuard>>,
}

impl App {
    fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let on_input = listen(&self.nodes.input, "input", move |_| {
            if let Some(app) = weak.upgrade() {
                let value = app.nodes.input.value();
                app.dashboard.borrow_mut().set_address(value);
            }
        })?;

        let weak = Rc::downgrade(self);
        let on_click = listen(&self.nodes.button, "click", move |_| {
            if let Some(app) = weak.upgrade() {
                if app.dashboard.borrow().can_submit() {
                    app.trigger();
                }
            }
        })?;

        self.listeners.borrow_mut().extend([on_input, on_click]);
        Ok(())
    }

    /// Start a lookup for the field's current contents, superseding (and
    /// aborting) any lookup still in flight.
    fn trigger(self: &Rc<Self>) {
        let (ticket, address) = {
            let mut dashboard = self.dashboard.borrow_mut();
            dashboard.set_address(self.nodes.input.value());
            (dashboard.begin(), dashboard.address().to_string())
        };

        if let Some(previous) = self.in_flight.borrow_mut().take() {
            previous.abort();
        }
        let (abort, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(abort);
        self.render();

        let weak = Rc::downgrade(self);
        let client = self.client.clone();
        spawn_local(async move {
            let lookup = Abortable::new(
                async move { client.lookup(&address).await },
                registration,
            );
            let Ok(result) = lookup.await else {
                tracing::debug!(generation = ticket.generation(), "Lookup aborted");
                return;
            };
            let Some(app) = weak.upgrade() else {
                return;
            };

            if app.dashboard.borrow_mut().complete(ticket, result) {
                app.in_flight.borrow_mut().take();
                app.render();
            }
        });
    }

    fn render(&self) {
        let dashboard = self.dashboard.borrow();
        let state = dashboard.state();

        self.nodes.button.set_disabled(state.is_loading());
        if state.is_loading() {
            self.nodes.button.set_inner_html(LOADING_LABEL);
        } else {
            self.nodes.button.set_text_content(Some(TRIGGER_LABEL));
        }

        show_text(&self.nodes.banner, state.banner().as_deref());
        show_text(&self.nodes.error, state.error_message());

        let mut chart = self.chart.borrow_mut();
        match state.visible_series() {
            Some(series) => {
                let revision = dashboard.revision();
                if matches!(chart.as_ref(), Some((shown, _)) if *shown == revision) {
                    return;
                }
                // Release the old chart before the new one takes the container.
                *chart = None;
                // Visible first: a hidden panel measures zero width.
                self.nodes.chart_panel.set_hidden(false);
                let host = ChartHost::mount(
                    SvgCandlestickChart::new(0),
                    ElementSurface::new(self.nodes.chart.clone()),
                    series,
                    &WindowViewport::new(self.window.clone()),
                );
                *chart = Some((revision, host));
            }
            None => {
                *chart = None;
                self.nodes.chart_panel.set_hidden(true);
            }
        }
    }

    fn teardown(&self) {
        if let Some(in_flight) = self.in_flight.borrow_mut().take() {
            in_flight.abort();
        }
        self.dashboard.borrow_mut().reset();
        self.chart.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        self.nodes.root.remove();
    }
}

/// Mount a dashboard into the element with id `container_id`.
///
/// Mounting again replaces the previous dashboard.
pub fn mount(container_id: &str, client: CoinGeckoClient) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {container_id:?}")))?;

    unmount();

    let nodes = Nodes::build(&document, &container)?;
    let app = Rc::new(App {
        client,
        window,
        nodes,
        dashboard: RefCell::new(Dashboard::new()),
        chart: RefCell::new(None),
        in_flight: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
    });

    if let Err(err) = app.bind() {
        tracing::error!("Failed to bind dashboard events: {}", js_error(&err));
        app.teardown();
        return Err(err);
    }
    app.render();

    tracing::info!(container_id, base_url = app.client.base_url(), "Dashboard mounted");
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Remove the mounted dashboard, if any, and release everything it holds.
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        app.teardown();
        tracing::info!("Dashboard unmounted");
    }
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn html_element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = element(document, tag, class)?
        .dyn_into()
        .map_err(JsValue::from)?;
    el.set_hidden(true);
    Ok(el)
}

fn show_text(el: &HtmlElement, text: Option<&str>) {
    el.set_text_content(text);
    el.set_hidden(text.is_none());
}

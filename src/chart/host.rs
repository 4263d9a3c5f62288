//! Scoped chart lifetime: mount acquires, drop releases.

use super::surface::ChartSurface;
use super::viewport::{ListenerGuard, Viewport};
use super::ChartRenderer;
use crate::domain::ohlc::OhlcSeries;
use std::cell::RefCell;
use std::rc::Rc;

struct Mounted<R, S> {
    renderer: R,
    surface: S,
}

impl<R: ChartRenderer, S: ChartSurface> Mounted<R, S> {
    /// Follow the container width; redraw only when it actually changed.
    fn fit_width(&mut self) {
        let width = self.surface.width();
        if width != self.renderer.width() {
            self.renderer.resize(width);
            self.surface.present(&self.renderer.render());
        }
    }
}

/// One series on screen.
///
/// While alive, the chart follows viewport resizes. Dropping it deregisters
/// the resize listener, then clears the surface. To show a different series,
/// drop the host and mount a new one.
pub struct ChartHost<R: ChartRenderer + 'static, S: ChartSurface + 'static> {
    mounted: Rc<RefCell<Mounted<R, S>>>,
    resize: Option<ListenerGuard>,
}

impl<R: ChartRenderer + 'static, S: ChartSurface + 'static> ChartHost<R, S> {
    /// Draw `series` into `surface` at the surface's width and start
    /// following `viewport` resizes.
    pub fn mount(
        mut renderer: R,
        mut surface: S,
        series: &OhlcSeries,
        viewport: &impl Viewport,
    ) -> Self {
        renderer.resize(surface.width());
        renderer.set_series(series);
        surface.present(&renderer.render());
        tracing::debug!(
            points = series.len(),
            width = renderer.width(),
            height = renderer.height(),
            "Chart mounted"
        );

        let mounted = Rc::new(RefCell::new(Mounted { renderer, surface }));
        let weak = Rc::downgrade(&mounted);
        let resize = viewport.on_resize(Box::new(move || {
            if let Some(mounted) = weak.upgrade() {
                if let Ok(mut mounted) = mounted.try_borrow_mut() {
                    mounted.fit_width();
                }
            }
        }));

        Self {
            mounted,
            resize: Some(resize),
        }
    }

    pub fn width(&self) -> u32 {
        self.mounted.borrow().renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.mounted.borrow().renderer.height()
    }

    /// Read access to the renderer.
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.mounted.borrow().renderer)
    }

    /// Explicit unmount; same as dropping.
    pub fn unmount(self) {}
}

impl<R: ChartRenderer + 'static, S: ChartSurface + 'static> Drop for ChartHost<R, S> {
    fn drop(&mut self) {
        drop(self.resize.take());
        if let Ok(mut mounted) = self.mounted.try_borrow_mut() {
            mounted.surface.clear();
        }
        tracing::debug!("Chart unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ManualViewport, MemorySurface, SvgCandlestickChart};
    use crate::domain::ohlc::{normalize, wire::RawOhlc};

    fn series() -> OhlcSeries {
        let raw: Vec<RawOhlc> =
            serde_json::from_str("[[1000,1,2,0.5,1.5],[1000,1,2,0.5,1.6],[2000,2,3,1,2]]")
                .unwrap();
        normalize(raw)
    }

    #[test]
    fn test_mount_draws_at_container_width() {
        let surface = MemorySurface::new(720);
        let viewport = ManualViewport::new();
        let host = ChartHost::mount(
            SvgCandlestickChart::new(0),
            surface.clone(),
            &series(),
            &viewport,
        );

        assert_eq!(host.width(), 720);
        assert_eq!(host.height(), 400);
        assert_eq!(viewport.listener_count(), 1);
        let markup = surface.markup().unwrap();
        assert!(markup.contains(r#"width="720""#));
        assert_eq!(markup.matches(r#"class="candle""#).count(), 2);
    }

    #[test]
    fn test_viewport_resize_updates_width_not_data() {
        let data = series();
        let surface = MemorySurface::new(800);
        let viewport = ManualViewport::new();
        let host = ChartHost::mount(SvgCandlestickChart::new(0), surface.clone(), &data, &viewport);

        surface.set_width(375);
        viewport.notify_resize();

        assert_eq!(host.width(), 375);
        assert!(host.with_renderer(|r| r.series() == &data));
        let markup = surface.markup().unwrap();
        assert!(markup.contains(r#"width="375""#));
        assert_eq!(markup.matches(r#"class="candle""#).count(), 2);
        assert_eq!(surface.present_count(), 2);
    }

    #[test]
    fn test_resize_without_width_change_skips_redraw() {
        let surface = MemorySurface::new(800);
        let viewport = ManualViewport::new();
        let _host = ChartHost::mount(SvgCandlestickChart::new(0), surface.clone(), &series(), &viewport);

        viewport.notify_resize();
        assert_eq!(surface.present_count(), 1);
    }

    #[test]
    fn test_drop_releases_listener_and_surface() {
        let surface = MemorySurface::new(640);
        let viewport = ManualViewport::new();
        let host = ChartHost::mount(SvgCandlestickChart::new(0), surface.clone(), &series(), &viewport);
        assert!(surface.markup().is_some());

        host.unmount();

        assert_eq!(viewport.listener_count(), 0);
        assert!(surface.markup().is_none());

        // Resizes after unmount reach nobody.
        surface.set_width(100);
        viewport.notify_resize();
        assert!(surface.markup().is_none());
    }

    #[test]
    fn test_remount_on_new_series_leaves_one_listener() {
        let surface = MemorySurface::new(500);
        let viewport = ManualViewport::new();
        let first = ChartHost::mount(SvgCandlestickChart::new(0), surface.clone(), &series(), &viewport);
        drop(first);

        let raw: Vec<RawOhlc> = serde_json::from_str("[[5000,1,1,1,1]]").unwrap();
        let second = ChartHost::mount(
            SvgCandlestickChart::new(0),
            surface.clone(),
            &normalize(raw),
            &viewport,
        );

        assert_eq!(viewport.listener_count(), 1);
        assert_eq!(second.with_renderer(|r| r.series().len()), 1);
        assert_eq!(
            surface.markup().unwrap().matches(r#"class="candle""#).count(),
            1
        );
    }
}

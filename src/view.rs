// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fractal view: the configuration of a window onto the complex
//! plane, and the buffers generated from it.

use log::debug;
use num::Complex;

use crate::errors::FractalError;
use crate::grid::{self, Histogram, IterationBuffer};
use crate::hue::{self, HueMap};
use crate::planes::Bounds;

/// Zoom level of a freshly created view.
pub const DEFAULT_ZOOM: f64 = 0.5;
/// Iteration bound of a freshly created view.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Everything needed to evaluate a view.  This is a plain value, so
/// `generate` takes a copy before any work starts and never sees a
/// half-updated configuration.  It can only be built through `new` or
/// the `with_*` methods, so the bounds always match the rest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewConfig {
    width: usize,
    height: usize,
    center: Complex<f64>,
    zoom: f64,
    max_iterations: usize,
    bounds: Bounds,
}

impl ViewConfig {
    /// Validates every field and derives the bounds.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
        zoom: f64,
        max_iterations: usize,
    ) -> Result<ViewConfig, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimension { width, height });
        }
        if max_iterations == 0 {
            return Err(FractalError::InvalidIterationBound);
        }
        let bounds = Bounds::around(center, zoom, width, height)?;
        Ok(ViewConfig {
            width,
            height,
            center,
            zoom,
            max_iterations,
            bounds,
        })
    }

    /// The same view moved to `center`.
    pub fn with_center(&self, center: Complex<f64>) -> Result<ViewConfig, FractalError> {
        ViewConfig::new(self.width, self.height, center, self.zoom, self.max_iterations)
    }

    /// The same view at a different zoom level.
    pub fn with_zoom(&self, zoom: f64) -> Result<ViewConfig, FractalError> {
        ViewConfig::new(self.width, self.height, self.center, zoom, self.max_iterations)
    }

    /// The same view with a different iteration bound.
    pub fn with_max_iterations(&self, max_iterations: usize) -> Result<ViewConfig, FractalError> {
        ViewConfig::new(self.width, self.height, self.center, self.zoom, max_iterations)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Point on the complex plane at the middle of the image.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Zoom level; the horizontal half-span is 1/zoom.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Iteration bound; points reaching it are in the set.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Visible region, derived from everything above.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A view onto the Mandelbrot set, and the most recently generated
/// iteration buffer, histogram and hue map for it.
#[derive(Debug)]
pub struct FractalView {
    config: ViewConfig,
    threads: usize,
    buffer: IterationBuffer,
    histogram: Histogram,
    hue: HueMap,
}

impl FractalView {
    /// A `width` x `height` view centered on `center`, at the default
    /// zoom and iteration bound, using one worker per CPU.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
    ) -> Result<FractalView, FractalError> {
        let config = ViewConfig::new(width, height, center, DEFAULT_ZOOM, DEFAULT_MAX_ITERATIONS)?;
        Ok(FractalView {
            config,
            threads: num_cpus::get(),
            buffer: IterationBuffer::new(width, height),
            histogram: Histogram::new(config.max_iterations),
            hue: HueMap::new(width, height),
        })
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> ViewConfig {
        self.config
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// The point at the middle of the image.
    pub fn center(&self) -> Complex<f64> {
        self.config.center
    }

    /// Moves the view.  The bounds follow immediately.
    pub fn set_center(&mut self, center: Complex<f64>) -> Result<(), FractalError> {
        self.config = self.config.with_center(center)?;
        Ok(())
    }

    /// The current zoom level.
    pub fn zoom(&self) -> f64 {
        self.config.zoom
    }

    /// Sets the zoom level and recomputes the bounds.  Fails, leaving
    /// the view untouched, unless `zoom` is finite and positive.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), FractalError> {
        self.config = self.config.with_zoom(zoom)?;
        Ok(())
    }

    /// Multiplies the zoom level by `factor`.
    pub fn scale_zoom(&mut self, factor: f64) -> Result<(), FractalError> {
        let zoom = self.config.zoom * factor;
        self.set_zoom(zoom)
    }

    /// The visible region of the complex plane.
    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    /// The iteration bound.
    pub fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    /// Changes the iteration bound.  The histogram is reallocated to
    /// the new length and the buffer and hue map are cleared, since
    /// none of them describe the new bound.
    pub fn set_max_iterations(&mut self, max_iterations: usize) -> Result<(), FractalError> {
        self.config = self.config.with_max_iterations(max_iterations)?;
        self.histogram = Histogram::new(max_iterations);
        self.buffer = IterationBuffer::new(self.config.width, self.config.height);
        self.hue = HueMap::new(self.config.width, self.config.height);
        Ok(())
    }

    /// Number of worker threads used by `generate`.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Sets the number of worker threads.  Zero means one.
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads.max(1);
    }

    /// Regenerates the iteration buffer, the histogram and the hue map
    /// from scratch.  Blocks until every pixel has been evaluated and
    /// colored.
    pub fn generate(&mut self) -> Result<(), FractalError> {
        let snapshot = self.config;
        debug!("Generating {:?}", snapshot);
        let (buffer, histogram) = grid::generate(&snapshot, self.threads)?;
        let hue = hue::colorize(&buffer, &histogram);
        self.buffer = buffer;
        self.histogram = histogram;
        self.hue = hue;
        Ok(())
    }

    /// Escape counts from the last `generate`.
    pub fn buffer(&self) -> &IterationBuffer {
        &self.buffer
    }

    /// Escape histogram from the last `generate`.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Hues from the last `generate`.
    pub fn hue(&self) -> &HueMap {
        &self.hue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Complex<f64> {
        Complex::new(0.0, 0.0)
    }

    #[test]
    fn new_applies_defaults() {
        let view = FractalView::new(8, 6, origin()).unwrap();
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
        assert_eq!(view.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(view.histogram().len(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(view.buffer().as_slice().len(), 48);
        assert!(view.threads() >= 1);
    }

    #[test]
    fn new_fails_on_bad_dimensions() {
        assert_eq!(
            FractalView::new(0, 6, origin()).unwrap_err(),
            FractalError::InvalidDimension {
                width: 0,
                height: 6
            }
        );
        assert!(FractalView::new(6, 0, origin()).is_err());
    }

    #[test]
    fn bad_settings_leave_the_view_alone() {
        let mut view = FractalView::new(8, 8, origin()).unwrap();
        let before = view.config();
        assert_eq!(view.set_zoom(0.0), Err(FractalError::InvalidZoom(0.0)));
        assert!(view.set_zoom(-2.0).is_err());
        assert!(view.scale_zoom(0.0).is_err());
        assert_eq!(
            view.set_max_iterations(0),
            Err(FractalError::InvalidIterationBound)
        );
        assert_eq!(view.config(), before);
    }

    #[test]
    fn config_rejects_what_the_grid_cannot_evaluate() {
        assert_eq!(
            ViewConfig::new(4, 0, origin(), 0.5, 10),
            Err(FractalError::InvalidDimension {
                width: 4,
                height: 0
            })
        );
        assert_eq!(
            ViewConfig::new(4, 4, origin(), 0.5, 0),
            Err(FractalError::InvalidIterationBound)
        );
        let config = ViewConfig::new(4, 4, origin(), 0.5, 10).unwrap();
        assert!(config.with_zoom(-1.0).is_err());
        assert!(config.with_max_iterations(0).is_err());
    }

    #[test]
    fn config_bounds_follow_every_change() {
        let config = ViewConfig::new(8, 4, origin(), 0.5, 10)
            .unwrap()
            .with_center(Complex::new(10.0, 10.0))
            .unwrap()
            .with_zoom(4.0)
            .unwrap();
        let expected = Bounds::around(Complex::new(10.0, 10.0), 4.0, 8, 4).unwrap();
        assert_eq!(config.bounds(), expected);
        assert_eq!(config.center(), Complex::new(10.0, 10.0));
        assert_eq!(config.zoom(), 4.0);
        assert_eq!((config.width(), config.height()), (8, 4));
        let deeper = config.with_max_iterations(99).unwrap();
        assert_eq!(deeper.bounds(), expected);
        assert_eq!(deeper.max_iterations(), 99);
    }

    #[test]
    fn set_center_moves_the_bounds() {
        let mut view = FractalView::new(8, 8, origin()).unwrap();
        view.set_center(Complex::new(1.0, -1.0)).unwrap();
        let b = view.bounds();
        assert_eq!((b.min_x, b.max_x), (-1.0, 3.0));
        assert_eq!((b.min_y, b.max_y), (-3.0, 1.0));
    }

    #[test]
    fn larger_zoom_narrows_symmetrically() {
        let mut view = FractalView::new(8, 6, Complex::new(-0.5, 0.1)).unwrap();
        let wide = view.bounds();
        view.set_zoom(3.0).unwrap();
        let narrow = view.bounds();
        assert!(narrow.span_x() < wide.span_x());
        assert!(narrow.span_y() < wide.span_y());
        let c = view.center();
        assert!(((narrow.min_x + narrow.max_x) / 2.0 - c.re).abs() < 1e-12);
        assert!(((narrow.min_y + narrow.max_y) / 2.0 - c.im).abs() < 1e-12);
    }

    #[test]
    fn scale_zoom_by_two_halves_the_ranges() {
        let mut view = FractalView::new(10, 5, Complex::new(0.25, 0.0)).unwrap();
        view.set_zoom(1.5).unwrap();
        let baseline = view.bounds();
        view.scale_zoom(2.0).unwrap();
        assert_eq!(view.zoom(), 3.0);
        let scaled = view.bounds();
        assert!((scaled.span_x() * 2.0 - baseline.span_x()).abs() < 1e-12);
        assert!((scaled.span_y() * 2.0 - baseline.span_y()).abs() < 1e-12);
    }

    #[test]
    fn set_max_iterations_reallocates() {
        let mut view = FractalView::new(4, 4, origin()).unwrap();
        view.generate().unwrap();
        view.set_max_iterations(20).unwrap();
        assert_eq!(view.histogram().as_slice(), &[0; 20][..]);
        assert!(view.buffer().as_slice().iter().all(|&c| c == 0));
        view.generate().unwrap();
        assert!(view.buffer().as_slice().iter().all(|&c| c <= 20));
        assert_eq!(view.histogram().len(), 20);
    }

    #[test]
    fn generate_uses_current_bounds() {
        let mut view = FractalView::new(4, 4, origin()).unwrap();
        view.set_max_iterations(50).unwrap();
        view.generate().unwrap();
        assert_eq!(view.buffer().get(2, 2), 50);
        // Far away from the set everything escapes at once.
        view.set_center(Complex::new(10.0, 10.0)).unwrap();
        view.set_zoom(4.0).unwrap();
        view.generate().unwrap();
        assert!(view.buffer().as_slice().iter().all(|&c| c == 0));
        assert_eq!(view.histogram().as_slice()[0], 16);
    }
}

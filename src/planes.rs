//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane described by a center and a
//! zoom level.  The complex rectangle is kept as a `Bounds`.
use log::debug;
use num::Complex;

use crate::errors::FractalError;

/// Linearly maps `x` from the range `in_low..in_high` onto the range
/// `out_low..out_high`.  Both endpoints map exactly; values outside
/// the input range extrapolate along the same line.
#[inline]
pub fn map_linear(x: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> f64 {
    if x == in_high {
        return out_high;
    }
    let t = (x - in_low) / (in_high - in_low);
    out_low + t * (out_high - out_low)
}

/// Describes the lower-left and upper-right corners of the visible
/// region of the complex plane, treating the real part as the
/// x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest real value in view
    pub min_x: f64,
    /// Smallest imaginary value in view
    pub min_y: f64,
    /// Largest real value in view
    pub max_x: f64,
    /// Largest imaginary value in view
    pub max_y: f64,
}

impl Bounds {
    /// The region seen by a `width` x `height` image centered on
    /// `center` at the given `zoom`.  A zoom of 1.0 spans one unit on
    /// either side of the center horizontally; the vertical span is
    /// stretched by the aspect ratio of the image.
    pub fn around(
        center: Complex<f64>,
        zoom: f64,
        width: usize,
        height: usize,
    ) -> Result<Bounds, FractalError> {
        if !(zoom > 0.0) || !zoom.is_finite() {
            return Err(FractalError::InvalidZoom(zoom));
        }
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimension { width, height });
        }

        let offset = 1.0 / zoom;
        let stretch = (height as f64) / (width as f64);

        let bounds = Bounds {
            min_x: center.re - offset,
            max_x: center.re + offset,
            min_y: center.im - offset * stretch,
            max_y: center.im + offset * stretch,
        };
        debug!("Bounds for {} at zoom {}: {:?}", center, zoom, bounds);
        Ok(bounds)
    }

    /// Width of the region on the real axis.
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the region on the imaginary axis.
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels from the one onto points
/// of the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    bounds: Bounds,
}

impl PlaneMapper {
    /// Constructor.  The bounds are assumed to already be validated.
    pub fn new(width: usize, height: usize, bounds: Bounds) -> PlaneMapper {
        PlaneMapper {
            width,
            height,
            bounds,
        }
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number at the equivalent location on the complex plane.
    /// Pixel (0, 0) lands on (min_x, min_y); the far edge at (width,
    /// height) would land on (max_x, max_y) but is never a real pixel.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            map_linear(
                pixel.0 as f64,
                0.0,
                self.width as f64,
                self.bounds.min_x,
                self.bounds.max_x,
            ),
            map_linear(
                pixel.1 as f64,
                0.0,
                self.height as f64,
                self.bounds.min_y,
                self.bounds.max_y,
            ),
        )
    }
}

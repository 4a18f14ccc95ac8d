//! The escape-time classifier.  Given a point on the complex plane,
//! iterate z = z² + c from the origin and report how quickly the orbit
//! leaves the circle of radius 2, or that it never did.

use num::Complex;

/// Once an orbit's magnitude exceeds this it is guaranteed to diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

/// True if the point lies inside the main cardioid, which is known to
/// be entirely within the Mandelbrot set.
#[inline]
pub fn in_main_cardioid(point: Complex<f64>) -> bool {
    let (a, b) = (point.re, point.im);
    let p = ((a - D4).powi(2) + b.powi(2)).sqrt();
    a <= p - 2.0 * p.powi(2) + D4
}

/// True if the point lies inside the period-2 bulb, the disc of radius
/// 1/4 centered on -1.
#[inline]
pub fn in_period2_bulb(point: Complex<f64>) -> bool {
    (point.re + 1.0).powi(2) + point.im.powi(2) <= D16
}

/// Returns the 0-based iteration at which the orbit of `point`
/// escaped, or `max_iterations` if the point is presumed to be in the
/// set.
///
/// Points inside the main cardioid or the period-2 bulb are not
/// iterated at all.  Otherwise the two previous iterates are kept, and
/// an orbit that lands exactly on either of them is caught in a cycle
/// of period one or two and can never escape.  Longer cycles are not
/// detected; those run out the iteration bound instead.
pub fn escape_time(point: Complex<f64>, max_iterations: usize) -> usize {
    if in_main_cardioid(point) || in_period2_bulb(point) {
        return max_iterations;
    }

    let mut last0 = Complex::new(0.0, 0.0);
    let mut last1 = Complex::new(0.0, 0.0);
    let mut z = Complex::new(0.0, 0.0);

    for i in 0..max_iterations {
        z = z * z + point;

        if z == last0 || z == last1 {
            return max_iterations;
        }

        if z.norm() > ESCAPE_RADIUS {
            return i;
        }

        last1 = last0;
        last0 = z;
    }
    max_iterations
}

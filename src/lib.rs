#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot generator
//!
//! The Mandelbrot set is the set of points on the complex plane whose
//! orbit under z = z² + c, starting at zero, never goes to infinity.
//! For every pixel of a view we map the pixel onto the plane and count
//! how many iterations its orbit survives before it leaves the circle
//! of radius 2.  That count is the "velocity" of the point; points
//! that survive every iteration we allow are presumed to be in the
//! set.
//!
//! Coloring by raw velocity produces sharp bands, because most of an
//! image escapes within a handful of iterations.  Instead, after every
//! pixel has been counted, we build a histogram of the counts and color
//! each pixel by the fraction of the image that escaped before it did.
//! This spreads the palette evenly over whatever range of velocities
//! the current view actually contains.

pub mod errors;
pub mod escape;
pub mod grid;
pub mod hue;
pub mod planes;
pub mod view;

pub use errors::FractalError;
pub use grid::{Histogram, IterationBuffer};
pub use hue::HueMap;
pub use planes::Bounds;
pub use view::{FractalView, ViewConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_ZOOM};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while configuring or generating a fractal view.
//! Configuration is validated when it is set, so the per-pixel loop
//! itself never has anything to report.

use failure::Fail;

/// Everything that can go wrong with a view.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum FractalError {
    /// Width or height of the pixel grid is zero.
    #[fail(display = "Invalid image dimensions {}x{}", width, height)]
    InvalidDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// The iteration bound must be at least one.
    #[fail(display = "Iteration bound must be positive")]
    InvalidIterationBound,

    /// Zoom must be finite and strictly positive; the bounds divide by it.
    #[fail(display = "Invalid zoom level {}", _0)]
    InvalidZoom(f64),

    /// A grid worker panicked, or the work queue was poisoned.
    #[fail(display = "Grid worker failed")]
    WorkerFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_bad_value() {
        let e = FractalError::InvalidDimension {
            width: 0,
            height: 4,
        };
        assert_eq!(format!("{}", e), "Invalid image dimensions 0x4");
        assert_eq!(
            format!("{}", FractalError::InvalidZoom(-1.5)),
            "Invalid zoom level -1.5"
        );
    }
}

//! Histogram coloring.  A pixel's hue is the share of escaped pixels
//! that escaped strictly before it did, which spreads the colors
//! evenly over however many iterations the image actually uses.

use crate::grid::{Histogram, IterationBuffer};

/// A width x height grid of hues in [0, 1], stored column by column
/// like the `IterationBuffer` it was made from.
#[derive(Clone, Debug, PartialEq)]
pub struct HueMap {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl HueMap {
    /// An all-zero hue map.
    pub fn new(width: usize, height: usize) -> Self {
        HueMap {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The hue of the pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[x * self.height + y]
    }

    /// The raw column-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }
}

/// `table[n]` is the normalized histogram mass below iteration `n`,
/// for every `n` in 0..=len.  Each entry adds one more term onto the
/// previous one, which is the same sequence of additions a pixel would
/// make summing its own prefix, so the lookup gives the same value.
pub fn cumulative(histogram: &Histogram) -> Vec<f64> {
    let total = histogram.total();
    let mut table = Vec::with_capacity(histogram.len() + 1);
    let mut running = 0.0;
    table.push(running);
    for &count in histogram.as_slice() {
        if total > 0 {
            running += f64::from(count) / total as f64;
        }
        table.push(running);
    }
    table
}

/// Converts escape counts into hues.  Must only be called with the
/// complete histogram of `buffer`.
///
/// A pixel at the iteration bound sums the entire histogram and so
/// gets the same hue as a pixel beyond the last escape, which is
/// usually 1.0.  If nothing escaped, every hue is 0.
pub fn colorize(buffer: &IterationBuffer, histogram: &Histogram) -> HueMap {
    let table = cumulative(histogram);
    let last = table.len() - 1;
    let cells = buffer
        .as_slice()
        .iter()
        .map(|&count| table[(count as usize).min(last)].min(1.0))
        .collect();
    HueMap {
        width: buffer.width(),
        height: buffer.height(),
        cells,
    }
}

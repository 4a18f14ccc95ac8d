// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid evaluation
//!
//! Every pixel of the view is mapped onto the complex plane and run
//! through the escape-time classifier.  The results are an iteration
//! buffer, holding the escape count of every pixel, and a histogram of
//! how many pixels escaped at each count.
//!
//! The work is shared by a fixed pool of scoped threads pulling whole
//! columns off a common queue.  Each column of the buffer is a
//! disjoint slice, so the writes need no coordination.  The histogram
//! is the only shared total: every worker fills a private partial
//! histogram, and the partials are summed once all workers have been
//! joined.  Nothing reads the histogram before that join.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, trace};
use std::sync::Mutex;

use crate::errors::FractalError;
use crate::escape::escape_time;
use crate::planes::{Pixel, PlaneMapper};
use crate::view::ViewConfig;

/// A width x height grid of escape counts, stored column by column.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationBuffer {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl IterationBuffer {
    /// A zero-filled buffer.
    pub fn new(width: usize, height: usize) -> Self {
        IterationBuffer {
            width,
            height,
            cells: vec![0; width * height],
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

    /// The escape count of the pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[x * self.height + y]
    }

    /// The raw column-major storage.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }

    fn columns_mut(&mut self) -> std::iter::Enumerate<std::slice::ChunksMut<u32>> {
        self.cells.chunks_mut(self.height).enumerate()
    }
}

/// Counts of pixels by escape iteration.  Slot `i` holds the number of
/// pixels that escaped at iteration `i`; pixels that reached the bound
/// are not counted anywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram(Vec<u32>);

impl Histogram {
    /// A zeroed histogram with one slot per iteration below `max_iterations`.
    pub fn new(max_iterations: usize) -> Self {
        Histogram(vec![0; max_iterations])
    }

    /// Records one pixel.  Counts at or beyond the bound are in the set
    /// and are ignored.
    #[inline]
    pub fn record(&mut self, count: usize) {
        if let Some(slot) = self.0.get_mut(count) {
            *slot += 1;
        }
    }

    /// Adds another histogram of the same length into this one.
    pub fn merge(&mut self, other: &Histogram) {
        for (slot, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *slot += theirs;
        }
    }

    /// The number of escaped pixels.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of slots, which is the iteration bound it was made for.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The per-iteration counts.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Evaluates every pixel of the view described by `config` on
/// `threads` worker threads.  Blocks until all of them are done; the
/// returned histogram is the exact sum of all the workers' partials.
pub fn generate(
    config: &ViewConfig,
    threads: usize,
) -> Result<(IterationBuffer, Histogram), FractalError> {
    let threads = threads.max(1);
    let (width, height) = (config.width(), config.height());
    let max_iterations = config.max_iterations();
    let plane = PlaneMapper::new(width, height, config.bounds());
    let mut buffer = IterationBuffer::new(width, height);

    debug!(
        "Evaluating {}x{} pixels ({} columns) on {} workers, bound {}",
        width, height, width, threads, max_iterations
    );

    let partials: Vec<Histogram> = {
        let columns = Mutex::new(buffer.columns_mut());
        let columns = &columns;
        let plane = &plane;
        crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<Histogram, FractalError>>> = (0..threads)
                .map(|worker| {
                    spawner.spawn(move |_| -> Result<Histogram, FractalError> {
                        let mut partial = Histogram::new(max_iterations);
                        let mut done = 0;
                        loop {
                            let column = {
                                columns
                                    .lock()
                                    .map_err(|_| FractalError::WorkerFailure)?
                                    .next()
                            };
                            match column {
                                Some((x, cells)) => {
                                    for (y, cell) in cells.iter_mut().enumerate() {
                                        let point = plane.pixel_to_point(&Pixel(x, y));
                                        let count = escape_time(point, max_iterations);
                                        *cell = count as u32;
                                        partial.record(count);
                                    }
                                    done += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        trace!("Worker {} finished {} columns", worker, done);
                        Ok(partial)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .map_err(|_| FractalError::WorkerFailure)
                        .and_then(|partial| partial)
                })
                .collect::<Result<Vec<Histogram>, FractalError>>()
        })
        .map_err(|_| FractalError::WorkerFailure)??
    };

    let mut histogram = Histogram::new(max_iterations);
    for partial in &partials {
        histogram.merge(partial);
    }
    debug!(
        "{} pixels escaped, {} presumed in the set",
        histogram.total(),
        (width * height) as u64 - histogram.total()
    );

    Ok((buffer, histogram))
}

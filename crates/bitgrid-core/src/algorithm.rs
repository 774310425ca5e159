//! Lifecycle contract for simulation algorithms consuming grids.
//!
//! Algorithms are built from a [`DenseGrid`](crate::DenseGrid) or
//! [`PackedGrid`](crate::PackedGrid) and then driven through three phases:
//! [`initialize`](GridAlgorithm::initialize) once, [`run`](GridAlgorithm::run) one or
//! more times, and [`finalize`](GridAlgorithm::finalize) once. [`Session`] enforces that
//! order.
//!
//! # Examples
//!
//! ```
//! use std::convert::Infallible;
//!
//! use bitgrid_core::{GridAlgorithm, RowWiseGrid, Session};
//!
//! /// Flips every cell once per iteration.
//! struct Invert {
//!     grid: RowWiseGrid<u8>,
//! }
//!
//! impl GridAlgorithm for Invert {
//!     type Error = Infallible;
//!
//!     fn initialize(&mut self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn run(&mut self, iterations: usize) -> Result<(), Infallible> {
//!         for _ in 0..iterations {
//!             for word in self.grid.words_mut() {
//!                 *word = !*word;
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn finalize(&mut self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let grid = RowWiseGrid::<u8>::new(8, 2)?;
//! let mut session = Session::start(Invert { grid }).unwrap();
//! session.run(3).unwrap();
//! assert_eq!(session.iterations(), 3);
//!
//! let Invert { grid } = session.finish().unwrap();
//! assert_eq!(grid.count_alive(), 16);
//! # Ok::<(), bitgrid_core::GridError>(())
//! ```

use std::error::Error;

/// A simulation algorithm with a three-phase lifecycle.
///
/// Implementations acquire resources in `initialize`, advance their state in `run`,
/// and release resources in `finalize`. Callers are expected to go through
/// [`Session`] rather than calling these directly.
pub trait GridAlgorithm {
    /// Error raised by any phase.
    type Error: Error;

    /// Prepares the algorithm. Called exactly once, before any `run`.
    ///
    /// # Errors
    ///
    /// Returns an error if resources cannot be acquired.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Advances the state by `iterations` steps. `0` is a valid count.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation cannot proceed.
    fn run(&mut self, iterations: usize) -> Result<(), Self::Error>;

    /// Releases resources. Called exactly once, after the last `run`.
    ///
    /// # Errors
    ///
    /// Returns an error if results cannot be written back.
    fn finalize(&mut self) -> Result<(), Self::Error>;
}

/// Drives a [`GridAlgorithm`] through its lifecycle.
///
/// Starting a session initializes the algorithm, and [`finish`](Self::finish) finalizes
/// it and hands it back so results can be read. A session dropped without being
/// finished still finalizes its algorithm.
#[derive(Debug)]
pub struct Session<A: GridAlgorithm> {
    algorithm: Option<A>,
    iterations: usize,
}

impl<A: GridAlgorithm> Session<A> {
    /// Initializes `algorithm` and starts a session.
    ///
    /// # Errors
    ///
    /// Returns the error from [`GridAlgorithm::initialize`]; the algorithm is not
    /// finalized in that case.
    pub fn start(mut algorithm: A) -> Result<Self, A::Error> {
        algorithm.initialize()?;
        log::debug!("algorithm initialized");
        Ok(Self {
            algorithm: Some(algorithm),
            iterations: 0,
        })
    }

    /// Runs `iterations` more steps.
    ///
    /// # Errors
    ///
    /// Returns the error from [`GridAlgorithm::run`].
    pub fn run(&mut self, iterations: usize) -> Result<(), A::Error> {
        let Some(algorithm) = self.algorithm.as_mut() else {
            unreachable!("session algorithm is only taken by finish or drop");
        };
        algorithm.run(iterations)?;
        self.iterations += iterations;
        log::trace!("ran {iterations} iterations, {} total", self.iterations);
        Ok(())
    }

    /// Returns the total number of iterations run so far.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the algorithm being driven.
    #[must_use]
    pub fn algorithm(&self) -> &A {
        let Some(algorithm) = self.algorithm.as_ref() else {
            unreachable!("session algorithm is only taken by finish or drop");
        };
        algorithm
    }

    /// Finalizes the algorithm and returns it.
    ///
    /// # Errors
    ///
    /// Returns the error from [`GridAlgorithm::finalize`].
    pub fn finish(mut self) -> Result<A, A::Error> {
        let Some(mut algorithm) = self.algorithm.take() else {
            unreachable!("session algorithm is only taken by finish or drop");
        };
        algorithm.finalize()?;
        log::debug!("algorithm finalized after {} iterations", self.iterations);
        Ok(algorithm)
    }
}

impl<A: GridAlgorithm> Drop for Session<A> {
    fn drop(&mut self) {
        if let Some(mut algorithm) = self.algorithm.take() {
            log::warn!(
                "session dropped without finish after {} iterations; finalizing",
                self.iterations
            );
            if let Err(err) = algorithm.finalize() {
                log::error!("failed to finalize algorithm: {err}");
            }
        }
    }
}

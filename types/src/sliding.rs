//! Count-based sliding window geometry.
//!
//! Unlike key-based [`WindowSpec`](crate::WindowSpec), count-based windows
//! never skip items: `step` may not exceed `length`.

use std::num::NonZeroUsize;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlidingSpecError {
    #[error("sliding window length must be at least 1")]
    ZeroLength,
    #[error("sliding window step must be at least 1")]
    ZeroStep,
    #[error("sliding window step ({step}) must not exceed its length ({length})")]
    StepExceedsLength { step: usize, length: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingSpec {
    length: NonZeroUsize,
    step: NonZeroUsize,
}

impl SlidingSpec {
    pub fn new(length: usize, step: usize) -> Result<Self, SlidingSpecError> {
        let length = NonZeroUsize::new(length).ok_or(SlidingSpecError::ZeroLength)?;
        let step = NonZeroUsize::new(step).ok_or(SlidingSpecError::ZeroStep)?;
        if step > length {
            return Err(SlidingSpecError::StepExceedsLength {
                step: step.get(),
                length: length.get(),
            });
        }
        Ok(Self { length, step })
    }

    /// Windows of `length` advancing one item at a time.
    pub fn unit_step(length: usize) -> Result<Self, SlidingSpecError> {
        Self::new(length, 1)
    }

    #[must_use]
    pub const fn length(self) -> usize {
        self.length.get()
    }

    #[must_use]
    pub const fn step(self) -> usize {
        self.step.get()
    }
}

//! Ordered keys used to place stream values into windows.

use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// A scalar key that window boundaries are computed over.
///
/// Keys only need a partial order: a value leaves the current window only
/// when its key is `>=` `window_start + size`, and arithmetic happens in
/// `Self` with no renormalization. Floating-point error in accumulated
/// boundaries is carried forward unchanged.
pub trait WindowKey: Copy + PartialOrd + Add<Output = Self> + fmt::Debug {
    /// Additive identity; sizes and steps must compare strictly greater.
    const ZERO: Self;

    /// `self + rhs`, or `None` when the sum leaves the representable range.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// `self + rhs`, clamped to the largest representable key.
    fn saturating_add(self, rhs: Self) -> Self;

    /// `true` when `self > ZERO`. NaN is never positive.
    #[must_use]
    fn is_positive(self) -> bool {
        self > Self::ZERO
    }
}

macro_rules! impl_window_key {
    (int => $($ty:ty),+ $(,)?) => {
        $(
            impl WindowKey for $ty {
                const ZERO: Self = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    <$ty>::saturating_add(self, rhs)
                }
            }
        )+
    };
    // Overflow to infinity (or NaN) counts as leaving the range.
    (float => $($ty:ty),+ $(,)?) => {
        $(
            impl WindowKey for $ty {
                const ZERO: Self = 0.0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    let sum = self + rhs;
                    sum.is_finite().then_some(sum)
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    self + rhs
                }
            }
        )+
    };
}

impl_window_key!(int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_window_key!(float => f32, f64);

impl WindowKey for Duration {
    const ZERO: Self = Duration::ZERO;

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Duration::checked_add(self, rhs)
    }

    fn saturating_add(self, rhs: Self) -> Self {
        Duration::saturating_add(self, rhs)
    }
}

//! Compile-time helpers for carrying validated invariants.

use serde::{Serialize, Serializer};
use std::fmt;

/// Out-of-range error for bounded numeric wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError<T> {
    /// Raw value provided.
    pub value: T,
    /// Inclusive minimum.
    pub min: T,
    /// Inclusive maximum.
    pub max: T,
}

impl<T: fmt::Display> fmt::Display for BoundsError<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "value {} is outside [{}, {}]",
            self.value, self.min, self.max
        )
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for BoundsError<T> {}

/// Bounded `u32` with const generic limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedU32<const MIN: u32, const MAX: u32>(u32);

impl<const MIN: u32, const MAX: u32> BoundedU32<MIN, MAX> {
    /// Inclusive lower bound.
    pub const MIN: u32 = MIN;
    /// Inclusive upper bound.
    pub const MAX: u32 = MAX;

    /// Create a bounded value when within the inclusive range.
    pub const fn new(value: u32) -> Option<Self> {
        if value < MIN || value > MAX {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Create a bounded value or return a bounds error.
    pub const fn try_new(value: u32) -> Result<Self, BoundsError<u32>> {
        match Self::new(value) {
            Some(value) => Ok(value),
            None => Err(BoundsError {
                value,
                min: MIN,
                max: MAX,
            }),
        }
    }

    /// Create a bounded value from a signed integer (negative values are out of range).
    pub fn try_from_i64(value: i64) -> Result<Self, BoundsError<i64>> {
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(BoundsError {
                value,
                min: i64::from(MIN),
                max: i64::from(MAX),
            })
    }

    /// Return the wrapped value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl<const MIN: u32, const MAX: u32> fmt::Display for BoundedU32<MIN, MAX> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl<const MIN: u32, const MAX: u32> Serialize for BoundedU32<MIN, MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

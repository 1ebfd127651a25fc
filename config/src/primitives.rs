use std::{
    hash::{Hash, Hasher},
    num::NonZeroU32,
};

use glam::DVec3;
use serde::{de::Error as DeserializeError, Deserialize, Deserializer};

use crate::Error;

/// A 3-dimensional vector.
#[derive(Copy, Clone, Deserialize, PartialEq, Eq, Hash)]
pub struct Vec3<T> {
    /// The X component of the vector.
    pub x: T,
    /// The Y component of the vector.
    pub y: T,
    /// The Z component of the vector.
    pub z: T,
}

impl<T: Into<f64>> From<Vec3<T>> for DVec3 {
    fn from(value: Vec3<T>) -> Self {
        Self {
            x: value.x.into(),
            y: value.y.into(),
            z: value.z.into(),
        }
    }
}

/// A finite 64-bit floating point type.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct FiniteFloat(f64);

impl Eq for FiniteFloat {}

impl Hash for FiniteFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<FiniteFloat> for f64 {
    fn from(float: FiniteFloat) -> Self {
        float.0
    }
}

impl TryFrom<f64> for FiniteFloat {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::NonFiniteFloat)
        }
    }
}

impl<'de> Deserialize<'de> for FiniteFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = f64::deserialize(deserializer)?;

        if inner.is_finite() {
            Ok(Self(inner))
        } else {
            Err(D::Error::custom(format!(
                "invalid value: `{inner}` is not finite"
            )))
        }
    }
}

/// A 1-based position of a key within its row's instance batch.
///
/// An ordinal is always at least 1; the interchange encoding uses 0 to mark
/// slots without a keycap, which decodes to the absence of an ordinal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ordinal(NonZeroU32);

impl Ordinal {
    /// Creates an ordinal from its 1-based value, returning `None` for 0.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Returns the 1-based value of the ordinal.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the zero-based index within the instance batch.
    #[must_use]
    pub fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

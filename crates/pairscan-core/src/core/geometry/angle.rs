use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A plane angle stored in radians.
///
/// Backbone dihedrals enter the engine already shifted into `[0, 2pi)`; arithmetic on
/// `Angle` does not re-shift, so callers that need the canonical range use [`Angle::shifted`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const HALF_REVOLUTION: Angle = Angle(PI);
    pub const ONE_REVOLUTION: Angle = Angle(TAU);

    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub const fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Returns the equivalent angle in `[0, 2pi)`.
    pub fn shifted(self) -> Self {
        let wrapped = self.0.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU {
            Self::ZERO
        } else {
            Self(wrapped)
        }
    }

    pub fn is_shifted(self) -> bool {
        (0.0..TAU).contains(&self.0)
    }

    /// Smallest difference between two shifted angles, going either way round the circle.
    pub fn wrapped_difference(self, other: Angle) -> Angle {
        let (lo, hi) = if self.0 <= other.0 {
            (self.0, other.0)
        } else {
            (other.0, self.0)
        };
        Self((hi - lo).min(lo + TAU - hi))
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn max(self, other: Angle) -> Angle {
        if other.0 > self.0 { other } else { self }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

/// Ratio of two angles.
impl Div for Angle {
    type Output = f64;
    fn div(self, rhs: Angle) -> f64 {
        self.0 / rhs.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round off the radian round trip so 45° prints as 45° and not 45.00000000000001°.
        let degrees = (self.degrees() * 1e9).round() / 1e9;
        write!(f, "{degrees}°")
    }
}

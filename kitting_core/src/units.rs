//! # Unit Types
//!
//! Type-safe wrappers for the metric units the estimator works in. These are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! Inputs arrive in meters and square meters; panel geometry is expressed in
//! millimeters, which is how formwork catalogs size their panels.
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::units::{Meters, Millimeters, SquareMeters};
//!
//! let height = Meters(2.4);
//! let height_mm: Millimeters = height.into();
//! assert_eq!(height_mm.0, 2400.0);
//!
//! let side = SquareMeters(100.0).square_side();
//! assert_eq!(side, Meters(10.0));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl Add for Millimeters {
    type Output = Millimeters;
    fn add(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Millimeters;
    fn sub(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 - rhs.0)
    }
}

impl Mul<f64> for Millimeters {
    type Output = Millimeters;
    fn mul(self, rhs: f64) -> Millimeters {
        Millimeters(self.0 * rhs)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl Millimeters {
    /// Smaller of two lengths
    pub fn min(self, other: Millimeters) -> Millimeters {
        Millimeters(self.0.min(other.0))
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Side length of a square footprint with this area
    pub fn square_side(self) -> Meters {
        Meters(self.0.sqrt())
    }

    /// Perimeter of a square footprint with this area
    pub fn square_perimeter(self) -> Meters {
        self.square_side() * 4.0
    }
}

//! Triangle Geometry Module
//!
//! Deterministic conversions between gas concentrations and positions on a
//! Duval triangle. Pure arithmetic, no allocation.
//!
//! ## Coordinate System
//! Equilateral triangle of side 100 with vertices:
//! - Left  = (0, 0)
//! - Right = (100, 0)
//! - Top   = (50, 50·√3)
//!
//! A point with percentages (top, right, left) sits at
//! `x = right + 0.5·top`, `y = (√3/2)·top`.
//!
//! ## Functions
//! - `normalize()` - raw gases → percentages summing to 100
//! - `to_coordinate()` - percentages → Cartesian point
//! - `point_from_two()` - point from two known percentages (diagram drawing)
//! - `diagram()` - zone boundary segments and label anchors

pub mod diagram;

pub use diagram::{diagram, Diagram, Label, LineSegment};

use thiserror::Error;

use crate::types::{GasConcentration, Point, TriangleMethod};

/// Half the square root of three, the height factor of the unit triangle.
const SQRT3_OVER_2: f64 = 0.866_025_403_784_438_6;

/// Errors in triangle classification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("No data: all three gases of {0} are zero or not measured")]
    NoData(TriangleMethod),
}

/// Convert (top, right, left) percentages into a Cartesian point.
///
/// Does not enforce `top + right + left = 100`; callers normalize first.
/// NaN inputs propagate to the output.
pub fn to_coordinate(p_top: f64, p_right: f64, _p_left: f64) -> Point {
    Point {
        x: p_right + 0.5 * p_top,
        y: SQRT3_OVER_2 * p_top,
    }
}

/// Normalize three raw concentrations into percentages of their sum.
///
/// Returns `None` when the total is zero (nothing measured).
pub fn normalize(g1: f64, g2: f64, g3: f64) -> Option<[f64; 3]> {
    let total = g1 + g2 + g3;
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    Some([g1 / total * 100.0, g2 / total * 100.0, g3 / total * 100.0])
}

/// Normalized (top, right, left) percentages of a triangle's gases.
pub fn triangle_percentages(
    method: TriangleMethod,
    gas: &GasConcentration,
) -> Result<[f64; 3], ClassificationError> {
    let [top, right, left] = method.roles().map(|g| gas.ppm(g));
    normalize(top, right, left).ok_or(ClassificationError::NoData(method))
}

/// Point for a triangle from raw concentrations.
pub fn position(
    method: TriangleMethod,
    gas: &GasConcentration,
) -> Result<Point, ClassificationError> {
    let [top, right, left] = triangle_percentages(method, gas)?;
    Ok(to_coordinate(top, right, left))
}

/// Point from any two known percentages; the third is `100 - a - b`.
///
/// Returns `None` unless at least two roles are given. When all three are
/// given the left value is ignored in favour of the top/right pair.
pub fn point_from_two(top: Option<f64>, right: Option<f64>, left: Option<f64>) -> Option<Point> {
    let (t, r) = match (top, right, left) {
        (Some(t), Some(r), _) => (t, r),
        (Some(t), None, Some(l)) => (t, 100.0 - t - l),
        (None, Some(r), Some(l)) => (100.0 - r - l, r),
        _ => return None,
    };
    Some(to_coordinate(t, r, 100.0 - t - r))
}

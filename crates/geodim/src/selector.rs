//! Resolves user selection queries on a coordinate axis to native grid
//! indices, reprojecting the query values when the axis carries a display CRS.

use approx::relative_eq;

use crate::crsaxis::{AxisKind, CrsAxis};
use crate::reproject::Reproject;
use crate::sampling::{AxisSampling, AxisSpan, IntervalAnchor};
use crate::{Error, Result};

/// Tolerance for coordinate equality, used by exact matches and boundary
/// checks.
pub const COORDINATE_TOLERANCE: f64 = 1e-8;

/// A selection query on a single axis.
///
/// Values are expressed in the axis's display CRS, or directly in native
/// coordinates when no display CRS is set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector {
    /// The coordinate that equals the value within tolerance.
    Exact(f64),
    /// The point or cell whose coverage contains the value.
    Contains(f64),
    /// Every point or cell intersecting the closed interval `[low, high]`.
    Range(f64, f64),
}

/// Native index positions produced by resolving a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIndices {
    Single(usize),
    Multiple(Vec<usize>),
}

impl ResolvedIndices {
    pub fn into_vec(self) -> Vec<usize> {
        match self {
            ResolvedIndices::Single(index) => vec![index],
            ResolvedIndices::Multiple(indices) => indices,
        }
    }

    pub fn first(&self) -> Option<usize> {
        match self {
            ResolvedIndices::Single(index) => Some(*index),
            ResolvedIndices::Multiple(indices) => indices.first().copied(),
        }
    }
}

/// Resolves a selector against the realized coordinates of an axis.
///
/// When the axis carries a display CRS, every value embedded in the selector
/// is reprojected to the native CRS first. The two bounds of a `Range` are
/// reprojected independently and are not re-sorted afterwards: a projection
/// that inverts their order produces an inverted (usually empty)
/// intersection test.
pub fn resolve<R>(coordinates: &[f64], axis: &CrsAxis, kind: AxisKind, selector: Selector, reprojector: &R) -> Result<ResolvedIndices>
where
    R: Reproject + ?Sized,
{
    let selector = to_native(axis, kind, selector, reprojector)?;

    match selector {
        Selector::Exact(value) => exact_index(coordinates, value).map(ResolvedIndices::Single),
        Selector::Contains(value) => containing_index(coordinates, axis, value).map(ResolvedIndices::Single),
        Selector::Range(low, high) => range_indices(coordinates, axis, low, high).map(ResolvedIndices::Multiple),
    }
}

fn to_native<R>(axis: &CrsAxis, kind: AxisKind, selector: Selector, reprojector: &R) -> Result<Selector>
where
    R: Reproject + ?Sized,
{
    let Some(display) = axis.display_crs() else {
        // Native coordinates act as the query space
        return Ok(selector);
    };

    let native = axis
        .native_crs()
        .ok_or_else(|| Error::Configuration("A display CRS requires a native CRS to reproject from".to_string()))?;

    let reproject_value = |value: f64| -> Result<f64> {
        reprojector
            .reproject(display, native, kind, &[value])?
            .first()
            .copied()
            .ok_or_else(|| Error::Projection("Reprojector returned no values".to_string()))
    };

    Ok(match selector {
        Selector::Exact(value) => Selector::Exact(reproject_value(value)?),
        Selector::Contains(value) => Selector::Contains(reproject_value(value)?),
        Selector::Range(low, high) => Selector::Range(reproject_value(low)?, reproject_value(high)?),
    })
}

fn coords_equal(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = COORDINATE_TOLERANCE, max_relative = COORDINATE_TOLERANCE)
}

fn exact_index(coordinates: &[f64], value: f64) -> Result<usize> {
    coordinates
        .iter()
        .position(|&c| coords_equal(c, value))
        .ok_or(Error::NoExactMatch(value))
}

fn containing_index(coordinates: &[f64], axis: &CrsAxis, value: f64) -> Result<usize> {
    match axis.sampling() {
        AxisSampling::Points => nearest_in_coverage(coordinates, value),
        AxisSampling::Intervals(anchor) => {
            if coordinates.is_empty() {
                return Err(Error::OutOfBounds(value));
            }

            // Validate the span once up front, not per cell
            cell_edges_checked(coordinates, axis.span(), anchor, 0)?;

            (0..coordinates.len())
                .find(|&i| {
                    let (inclusive, exclusive) = cell_edges(coordinates, axis.span(), anchor, i);
                    in_cell(value, inclusive, exclusive)
                })
                .ok_or(Error::OutOfBounds(value))
        }
    }
}

fn nearest_in_coverage(coordinates: &[f64], value: f64) -> Result<usize> {
    let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
        return Err(Error::OutOfBounds(value));
    };

    let min = first.min(*last) - COORDINATE_TOLERANCE;
    let max = first.max(*last) + COORDINATE_TOLERANCE;
    if value < min || value > max {
        return Err(Error::OutOfBounds(value));
    }

    let mut nearest = 0;
    for (i, &c) in coordinates.iter().enumerate() {
        if (c - value).abs() < (coordinates[nearest] - value).abs() {
            nearest = i;
        }
    }

    Ok(nearest)
}

fn range_indices(coordinates: &[f64], axis: &CrsAxis, low: f64, high: f64) -> Result<Vec<usize>> {
    match axis.sampling() {
        AxisSampling::Points => Ok((0..coordinates.len())
            .filter(|&i| coordinates[i] >= low && coordinates[i] <= high)
            .collect()),
        AxisSampling::Intervals(anchor) => {
            if coordinates.is_empty() {
                return Ok(Vec::new());
            }

            // Validate the span once up front, not per cell
            cell_edges_checked(coordinates, axis.span(), anchor, 0)?;

            Ok((0..coordinates.len())
                .filter(|&i| {
                    let (inclusive, exclusive) = cell_edges(coordinates, axis.span(), anchor, i);
                    cell_intersects_range(inclusive, exclusive, low, high)
                })
                .collect())
        }
    }
}

/// The edges of cell `i`: the anchored edge is inclusive, the opposite edge
/// exclusive. For descending axes the signed step points the exclusive edge
/// below the inclusive one.
fn cell_edges(coordinates: &[f64], span: AxisSpan, anchor: IntervalAnchor, index: usize) -> (f64, f64) {
    let coordinate = coordinates[index];
    let step = match span {
        AxisSpan::Regular(step) => step,
        _ => cell_step(coordinates, anchor, index),
    };

    match anchor {
        IntervalAnchor::Start => (coordinate, coordinate + step),
        IntervalAnchor::End => (coordinate, coordinate - step),
        IntervalAnchor::Center => (coordinate - step / 2.0, coordinate + step / 2.0),
    }
}

fn cell_edges_checked(coordinates: &[f64], span: AxisSpan, anchor: IntervalAnchor, index: usize) -> Result<(f64, f64)> {
    match span {
        AxisSpan::Unknown => Err(Error::Configuration(
            "Interval containment requires a known axis span".to_string(),
        )),
        AxisSpan::Irregular if coordinates.len() < 2 => Err(Error::Configuration(
            "Irregular axis spans require at least two coordinates".to_string(),
        )),
        _ => Ok(cell_edges(coordinates, span, anchor, index)),
    }
}

/// Per-cell signed step of an irregularly spaced axis. The outermost cell
/// reuses the width of its neighbour.
fn cell_step(coordinates: &[f64], anchor: IntervalAnchor, index: usize) -> f64 {
    let n = coordinates.len();
    match anchor {
        IntervalAnchor::Start | IntervalAnchor::Center => {
            if index + 1 < n {
                coordinates[index + 1] - coordinates[index]
            } else {
                coordinates[n - 1] - coordinates[n - 2]
            }
        }
        IntervalAnchor::End => {
            if index > 0 {
                coordinates[index] - coordinates[index - 1]
            } else {
                coordinates[1] - coordinates[0]
            }
        }
    }
}

fn in_cell(value: f64, inclusive: f64, exclusive: f64) -> bool {
    if inclusive <= exclusive {
        value >= inclusive && value < exclusive
    } else {
        value <= inclusive && value > exclusive
    }
}

fn cell_intersects_range(inclusive: f64, exclusive: f64, low: f64, high: f64) -> bool {
    if inclusive <= exclusive {
        // Cell covers [inclusive, exclusive)
        inclusive <= high && exclusive > low
    } else {
        // Descending cell covers (exclusive, inclusive]
        inclusive >= low && exclusive < high
    }
}

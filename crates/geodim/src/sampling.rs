//! Axis ordering and sampling semantics.

use approx::relative_eq;
use itertools::Itertools;

/// Direction of a coordinate sequence relative to its index positions.
///
/// Invariant: the order must match the actual monotonicity of the sequence
/// it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOrder {
    #[default]
    Ascending,
    Descending,
}

/// The part of a coordinate interval a stored index value represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalAnchor {
    Start,
    Center,
    End,
}

impl IntervalAnchor {
    /// Position of the anchor within the cell as a fraction of the step.
    const fn offset(self) -> f64 {
        match self {
            IntervalAnchor::Start => 0.0,
            IntervalAnchor::Center => 0.5,
            IntervalAnchor::End => 1.0,
        }
    }
}

/// Whether index values are exact sample locations or denote one edge of a
/// cell covering a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisSampling {
    Points,
    Intervals(IntervalAnchor),
}

/// Spacing description of a coordinate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisSpan {
    /// A single signed step applies between all consecutive coordinates.
    Regular(f64),
    /// Per-interval steps must be looked up from the coordinates.
    Irregular,
    /// The span has not been determined yet.
    #[default]
    Unknown,
}

impl AxisSpan {
    /// Classifies the spacing of a realized coordinate sequence.
    ///
    /// Sequences shorter than two elements have no derivable step.
    pub fn of_sequence(coords: &[f64]) -> AxisSpan {
        if coords.len() < 2 {
            return AxisSpan::Unknown;
        }

        let step = coords[1] - coords[0];
        if step == 0.0 {
            return AxisSpan::Irregular;
        }

        let regular = coords
            .iter()
            .tuple_windows()
            .all(|(a, b)| relative_eq!(b - a, step, epsilon = 1e-12, max_relative = 1e-6));

        if regular { AxisSpan::Regular(step) } else { AxisSpan::Irregular }
    }
}

/// Translates a coordinate sequence from one interval anchor to another.
///
/// The step is the signed step of the sequence, so descending axes shift
/// towards their lower edge automatically.
pub fn shift_anchor(coords: &[f64], step: f64, from: IntervalAnchor, to: IntervalAnchor) -> Vec<f64> {
    let offset = (to.offset() - from.offset()) * step;
    coords.iter().map(|&c| c + offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn span_of_sequence() {
        assert_eq!(AxisSpan::of_sequence(&[]), AxisSpan::Unknown);
        assert_eq!(AxisSpan::of_sequence(&[5.0]), AxisSpan::Unknown);
        assert_eq!(AxisSpan::of_sequence(&[10.0, 10.5, 11.0, 11.5]), AxisSpan::Regular(0.5));
        assert_eq!(AxisSpan::of_sequence(&[50.0, 49.5, 49.0]), AxisSpan::Regular(-0.5));
        assert_eq!(AxisSpan::of_sequence(&[0.0, 1.0, 3.0]), AxisSpan::Irregular);
        assert_eq!(AxisSpan::of_sequence(&[2.0, 2.0, 2.0]), AxisSpan::Irregular);
    }

    #[test]
    fn span_of_sequence_tolerates_rounding() {
        let coords: Vec<f64> = (0..100).map(|i| 1.0e6 + i as f64 * 0.5).collect();
        assert_eq!(AxisSpan::of_sequence(&coords), AxisSpan::Regular(0.5));
    }

    #[test]
    fn shift_anchor_ascending() {
        let coords = [10.0, 10.5, 11.0];

        let centers = shift_anchor(&coords, 0.5, IntervalAnchor::Start, IntervalAnchor::Center);
        assert_relative_eq!(centers[0], 10.25);
        assert_relative_eq!(centers[2], 11.25);

        let starts = shift_anchor(&centers, 0.5, IntervalAnchor::Center, IntervalAnchor::Start);
        assert_relative_eq!(starts[0], 10.0);
        assert_relative_eq!(starts[2], 11.0);
    }

    #[test]
    fn shift_anchor_descending() {
        // Descending latitude rows anchored at the top edge of each cell
        let coords = [50.0, 49.5, 49.0];

        let centers = shift_anchor(&coords, -0.5, IntervalAnchor::Start, IntervalAnchor::Center);
        assert_relative_eq!(centers[0], 49.75);

        let ends = shift_anchor(&coords, -0.5, IntervalAnchor::Start, IntervalAnchor::End);
        assert_relative_eq!(ends[0], 49.5);
    }
}

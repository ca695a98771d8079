//! Reprojection seam between axis selectors and the projection backend.

use proj4rs::Proj;
use proj4rs::transform::transform;

use crate::Point;
use crate::Result;
use crate::crs::Crs;
use crate::crsaxis::AxisKind;

/// Reprojects axis coordinate values between two coordinate reference systems.
///
/// Implementations return the values in the same order and count as the
/// input and retain no state between calls.
pub trait Reproject {
    fn reproject(&self, source: &Crs, target: &Crs, kind: AxisKind, values: &[f64]) -> Result<Vec<f64>>;
}

/// Returns the input values unchanged, for axes whose display space equals
/// their native space.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReprojector;

impl Reproject for IdentityReprojector {
    fn reproject(&self, _source: &Crs, _target: &Crs, _kind: AxisKind, values: &[f64]) -> Result<Vec<f64>> {
        Ok(values.to_vec())
    }
}

/// proj4rs backed reprojector.
///
/// Axis values are reprojected one axis at a time: the companion coordinate
/// of the pair is pinned to 0 and its output discarded. This is exact only
/// for projections where longitude and latitude transform independently of
/// each other at that reference, which holds for the common cylindrical
/// cases but not universally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjReprojector;

impl ProjReprojector {
    pub fn new() -> Self {
        ProjReprojector
    }
}

impl Reproject for ProjReprojector {
    fn reproject(&self, source: &Crs, target: &Crs, kind: AxisKind, values: &[f64]) -> Result<Vec<f64>> {
        if source == target {
            return Ok(values.to_vec());
        }

        let src = Proj::from_proj_string(&source.to_proj_string()?)?;
        let dst = Proj::from_proj_string(&target.to_proj_string()?)?;

        let mut result = Vec::with_capacity(values.len());
        for &value in values {
            let mut point: Point = match kind {
                AxisKind::Longitude => Point::new(value, 0.0),
                AxisKind::Latitude => Point::new(0.0, value),
            };

            if src.is_latlong() {
                point = point.to_radians();
            }

            transform(&src, &dst, &mut point)?;

            if dst.is_latlong() {
                point = point.to_degrees();
            }

            result.push(match kind {
                AxisKind::Longitude => point.x(),
                AxisKind::Latitude => point.y(),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::epsg;
    use approx::assert_relative_eq;

    const WEB_MERCATOR_RADIUS: f64 = 6378137.0;

    #[test]
    fn longitude_to_web_mercator() -> crate::Result<()> {
        let reprojector = ProjReprojector::new();
        let source = Crs::from_epsg(epsg::WGS84);
        let target = Crs::from_epsg(epsg::WGS84_WEB_MERCATOR);

        let result = reprojector.reproject(&source, &target, AxisKind::Longitude, &[0.0, 11.0])?;

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0], 0.0, epsilon = 1e-6);
        // Web mercator x is spherical: R * lon in radians
        assert_relative_eq!(result[1], WEB_MERCATOR_RADIUS * 11.0f64.to_radians(), max_relative = 1e-9);

        Ok(())
    }

    #[test]
    fn latitude_round_trip() -> crate::Result<()> {
        let reprojector = ProjReprojector::new();
        let native = Crs::from_epsg(epsg::WGS84);
        let display = Crs::from_epsg(epsg::WGS84_WEB_MERCATOR);

        let projected = reprojector.reproject(&native, &display, AxisKind::Latitude, &[49.0, 48.5])?;
        let restored = reprojector.reproject(&display, &native, AxisKind::Latitude, &projected)?;

        assert_relative_eq!(restored[0], 49.0, max_relative = 1e-9);
        assert_relative_eq!(restored[1], 48.5, max_relative = 1e-9);

        Ok(())
    }

    #[test]
    fn identical_descriptors_short_circuit() -> crate::Result<()> {
        let reprojector = ProjReprojector::new();
        // An unresolvable descriptor is never touched when source and target match
        let crs = Crs::from_definition("not a projection");

        let values = [1.0, 2.0, 3.0];
        assert_eq!(reprojector.reproject(&crs, &crs, AxisKind::Longitude, &values)?, values.to_vec());

        Ok(())
    }

    #[test]
    fn identity_reprojector_is_a_passthrough() -> crate::Result<()> {
        let values = [10.0, 10.5];
        let result = IdentityReprojector.reproject(
            &Crs::from_epsg(epsg::WGS84),
            &Crs::from_epsg(epsg::WGS84_WEB_MERCATOR),
            AxisKind::Longitude,
            &values,
        )?;

        assert_eq!(result, values.to_vec());

        Ok(())
    }
}

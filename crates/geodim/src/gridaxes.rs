//! Derives CRS-aware coordinate axes from a raster's affine geotransform and
//! builds a geotransform back from a pair of axes for writing.

use crate::crs::Crs;
use crate::crsaxis::CrsAxis;
use crate::geotransform::GeoTransform;
use crate::rastersize::RasterSize;
use crate::sampling::{AxisOrder, AxisSampling, AxisSpan, IntervalAnchor};
use crate::{Error, Result};

/// 1-based raster band index.
///
/// The band api's use a 1-based index for bands. We use `NonZeroUsize` to
/// make it impossible to represent band index 0.
pub type BandIndex = std::num::NonZeroUsize;

/// Convenience constant for the first band (band 1).
pub const FIRST_BAND: BandIndex = std::num::NonZeroUsize::new(1).unwrap();

/// The raster format's area-or-point metadata flag.
///
/// `Area` means a cell value covers the full cell extent, `Point` means it is
/// an exact sample at the cell location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelRegistration {
    Area,
    Point,
}

/// Directional defaults for the derived axes.
///
/// Passed explicitly into the axis builder so alternate conventions can be
/// substituted per caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConventions {
    pub longitude: AxisOrder,
    pub latitude: AxisOrder,
    pub band: AxisOrder,
}

impl AxisConventions {
    /// Conventional raster layout: west-to-east columns, top-down rows.
    pub const fn raster() -> Self {
        AxisConventions {
            longitude: AxisOrder::Ascending,
            latitude: AxisOrder::Descending,
            band: AxisOrder::Ascending,
        }
    }
}

impl Default for AxisConventions {
    fn default() -> Self {
        Self::raster()
    }
}

/// A realized coordinate axis: the coordinate values in the native CRS plus
/// the metadata describing them.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    pub coordinates: Vec<f64>,
    pub axis: CrsAxis,
}

impl GridAxis {
    /// The regular step of the realized sequence, if there is one.
    pub fn step(&self) -> Option<f64> {
        match self.axis.span() {
            AxisSpan::Regular(step) => Some(step),
            _ => None,
        }
    }
}

/// The spatial and band axes derived from a raster's geotransform.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    pub longitude: GridAxis,
    pub latitude: GridAxis,
    pub bands: Vec<BandIndex>,
}

/// Derives the longitude, latitude and band axes of a raster grid.
///
/// The longitude sequence spans `origin_x .. origin_x + x_step * (cols - 1)`,
/// the latitude sequence `origin_y .. origin_y + y_step * (rows - 1)`, each
/// realized in the direction the conventions dictate regardless of the sign
/// of the raw step coefficient.
///
/// Rotated or sheared geotransforms are not supported and fail without
/// producing a partial result.
pub fn axes_from_geotransform(
    transform: &GeoTransform,
    size: RasterSize,
    band_count: usize,
    native_crs: Option<Crs>,
    display_crs: Option<Crs>,
    registration: Option<PixelRegistration>,
    conventions: &AxisConventions,
) -> Result<GridAxes> {
    if !transform.is_axis_aligned() {
        return Err(Error::UnsupportedGeometry(format!(
            "Rotated geotransforms are not supported: {transform:?}"
        )));
    }

    if transform.cell_size_x() == 0.0 || transform.cell_size_y() == 0.0 {
        return Err(Error::InvalidArgument(format!("Geotransform with zero cell size: {transform:?}")));
    }

    let sampling = match registration {
        Some(PixelRegistration::Point) => AxisSampling::Points,
        Some(PixelRegistration::Area) => AxisSampling::Intervals(IntervalAnchor::Start),
        None => {
            log::debug!("No pixel registration metadata, assuming area (interval) sampling");
            AxisSampling::Intervals(IntervalAnchor::Start)
        }
    };

    let top_left = transform.top_left();
    let lon_coords = realize_sequence(top_left.x(), transform.cell_size_x(), size.cols, conventions.longitude);
    let lat_coords = realize_sequence(top_left.y(), transform.cell_size_y(), size.rows, conventions.latitude);

    // The spans are recomputed from the realized sequences rather than copied
    // from the raw coefficients to avoid compounding rounding error on
    // repeated round-trips.
    let longitude = GridAxis {
        axis: CrsAxis::new(
            conventions.longitude,
            AxisSpan::of_sequence(&lon_coords),
            sampling,
            native_crs.clone(),
            display_crs.clone(),
        )?,
        coordinates: lon_coords,
    };

    let latitude = GridAxis {
        axis: CrsAxis::new(
            conventions.latitude,
            AxisSpan::of_sequence(&lat_coords),
            sampling,
            native_crs,
            display_crs,
        )?,
        coordinates: lat_coords,
    };

    let mut bands: Vec<BandIndex> = (1..=band_count).filter_map(BandIndex::new).collect();
    if conventions.band == AxisOrder::Descending {
        bands.reverse();
    }

    Ok(GridAxes {
        longitude,
        latitude,
        bands,
    })
}

/// Builds an axis aligned geotransform from a pair of realized axes.
///
/// Both coordinate sequences must already be anchored at the start of their
/// cells so their first value is the top left pixel corner, shifting the
/// anchor beforehand is the caller's responsibility.
pub fn geotransform_from_axes(lat_coords: &[f64], lat_step: f64, lon_coords: &[f64], lon_step: f64) -> Result<GeoTransform> {
    let origin_x = lon_coords
        .first()
        .copied()
        .ok_or_else(|| Error::InvalidArgument("Empty longitude axis".to_string()))?;
    let origin_y = lat_coords
        .first()
        .copied()
        .ok_or_else(|| Error::InvalidArgument("Empty latitude axis".to_string()))?;

    Ok(GeoTransform::new([origin_x, lon_step, 0.0, origin_y, 0.0, lat_step]))
}

fn realize_sequence(origin: f64, step: f64, count: usize, order: AxisOrder) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }

    let last = origin + step * (count - 1) as f64;
    let (start, signed_step) = match order {
        AxisOrder::Ascending => (origin.min(last), step.abs()),
        AxisOrder::Descending => (origin.max(last), -step.abs()),
    };

    (0..count).map(|i| start + signed_step * i as f64).collect()
}

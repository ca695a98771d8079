//! CRS-aware axis metadata for raster dimensions.

use crate::crs::Crs;
use crate::sampling::{AxisOrder, AxisSampling, AxisSpan};
use crate::{Error, Result};

/// Distinguishes longitude-like from latitude-like coordinate axes.
///
/// Threaded explicitly through every reprojection call so the backend knows
/// which component of a coordinate pair the axis values represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    Longitude,
    Latitude,
}

/// Ordering, sampling and CRS metadata of a single raster dimension.
///
/// The raw coordinate values of the dimension are expressed in the native
/// CRS. When a display CRS is present, user-facing selectors are expressed in
/// display coordinates and reprojected to native coordinates before lookup.
///
/// A `CrsAxis` is immutable once constructed. Changing a field produces a new
/// value through the `with_` methods so axes can be shared freely between
/// array views.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrsAxis {
    order: AxisOrder,
    span: AxisSpan,
    sampling: AxisSampling,
    native_crs: Option<Crs>,
    display_crs: Option<Crs>,
}

impl CrsAxis {
    /// Creates a new axis description.
    ///
    /// A display CRS requires a native CRS as reprojection needs both
    /// endpoints, violating this is a configuration error.
    pub fn new(
        order: AxisOrder,
        span: AxisSpan,
        sampling: AxisSampling,
        native_crs: Option<Crs>,
        display_crs: Option<Crs>,
    ) -> Result<Self> {
        if display_crs.is_some() && native_crs.is_none() {
            return Err(Error::Configuration(
                "A display CRS requires a native CRS to reproject from".to_string(),
            ));
        }

        Ok(CrsAxis {
            order,
            span,
            sampling,
            native_crs,
            display_crs,
        })
    }

    pub fn order(&self) -> AxisOrder {
        self.order
    }

    pub fn span(&self) -> AxisSpan {
        self.span
    }

    pub fn sampling(&self) -> AxisSampling {
        self.sampling
    }

    pub fn native_crs(&self) -> Option<&Crs> {
        self.native_crs.as_ref()
    }

    pub fn display_crs(&self) -> Option<&Crs> {
        self.display_crs.as_ref()
    }

    pub fn with_order(&self, order: AxisOrder) -> Self {
        CrsAxis { order, ..self.clone() }
    }

    pub fn with_span(&self, span: AxisSpan) -> Self {
        CrsAxis { span, ..self.clone() }
    }

    pub fn with_sampling(&self, sampling: AxisSampling) -> Self {
        CrsAxis {
            sampling,
            ..self.clone()
        }
    }

    pub fn with_native_crs(&self, native_crs: Option<Crs>) -> Result<Self> {
        Self::new(self.order, self.span, self.sampling, native_crs, self.display_crs.clone())
    }

    pub fn with_display_crs(&self, display_crs: Option<Crs>) -> Result<Self> {
        Self::new(self.order, self.span, self.sampling, self.native_crs.clone(), display_crs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::epsg;
    use crate::sampling::IntervalAnchor;

    fn lon_axis() -> CrsAxis {
        CrsAxis::new(
            AxisOrder::Ascending,
            AxisSpan::Regular(0.5),
            AxisSampling::Intervals(IntervalAnchor::Start),
            Some(Crs::from_epsg(epsg::WGS84)),
            None,
        )
        .expect("valid axis")
    }

    #[test]
    fn display_crs_requires_native_crs() {
        let result = CrsAxis::new(
            AxisOrder::Ascending,
            AxisSpan::Unknown,
            AxisSampling::Points,
            None,
            Some(Crs::from_epsg(epsg::WGS84_WEB_MERCATOR)),
        );

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn rebuild_with_overrides() -> crate::Result<()> {
        let axis = lon_axis();

        let display = axis.with_display_crs(Some(Crs::from_epsg(epsg::WGS84_WEB_MERCATOR)))?;
        assert_eq!(display.display_crs(), Some(&Crs::from_epsg(epsg::WGS84_WEB_MERCATOR)));
        // the original is untouched
        assert_eq!(axis.display_crs(), None);

        let descending = axis.with_order(AxisOrder::Descending);
        assert_eq!(descending.order(), AxisOrder::Descending);
        assert_eq!(descending.span(), AxisSpan::Regular(0.5));

        Ok(())
    }

    #[test]
    fn clearing_native_crs_with_display_crs_fails() -> crate::Result<()> {
        let axis = lon_axis().with_display_crs(Some(Crs::from_epsg(epsg::WGS84_WEB_MERCATOR)))?;
        assert!(matches!(axis.with_native_crs(None), Err(Error::Configuration(_))));
        Ok(())
    }
}

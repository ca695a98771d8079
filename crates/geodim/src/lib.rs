#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod crs;
mod crsaxis;
mod error;
mod geotransform;
mod gridaxes;
mod rastersize;
mod reproject;
mod sampling;
mod selector;

#[doc(inline)]
pub use crsaxis::AxisKind;
#[doc(inline)]
pub use crsaxis::CrsAxis;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use geotransform::GeoTransform;
#[doc(inline)]
pub use gridaxes::AxisConventions;
#[doc(inline)]
pub use gridaxes::BandIndex;
#[doc(inline)]
pub use gridaxes::FIRST_BAND;
#[doc(inline)]
pub use gridaxes::GridAxes;
#[doc(inline)]
pub use gridaxes::GridAxis;
#[doc(inline)]
pub use gridaxes::PixelRegistration;
#[doc(inline)]
pub use gridaxes::axes_from_geotransform;
#[doc(inline)]
pub use gridaxes::geotransform_from_axes;
#[doc(inline)]
pub use rastersize::RasterSize;
#[doc(inline)]
pub use reproject::IdentityReprojector;
#[doc(inline)]
pub use reproject::ProjReprojector;
#[doc(inline)]
pub use reproject::Reproject;
#[doc(inline)]
pub use sampling::AxisOrder;
#[doc(inline)]
pub use sampling::AxisSampling;
#[doc(inline)]
pub use sampling::AxisSpan;
#[doc(inline)]
pub use sampling::IntervalAnchor;
#[doc(inline)]
pub use sampling::shift_anchor;
#[doc(inline)]
pub use selector::COORDINATE_TOLERANCE;
#[doc(inline)]
pub use selector::ResolvedIndices;
#[doc(inline)]
pub use selector::Selector;
#[doc(inline)]
pub use selector::resolve;

pub type Point<T = f64> = geo_types::Point<T>;

//! Coordinate reference system descriptors.

use crate::{Error, Result};

/// EPSG code of a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epsg(u16);

impl Epsg {
    pub const fn new(code: u16) -> Self {
        Epsg(code)
    }

    pub const fn code(self) -> u16 {
        self.0
    }
}

impl From<u16> for Epsg {
    fn from(code: u16) -> Self {
        Epsg(code)
    }
}

impl From<Epsg> for u16 {
    fn from(epsg: Epsg) -> u16 {
        epsg.0
    }
}

impl std::fmt::Display for Epsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Frequently used EPSG codes.
pub mod epsg {
    use super::Epsg;

    pub const WGS84: Epsg = Epsg::new(4326);
    pub const WGS84_WEB_MERCATOR: Epsg = Epsg::new(3857);
    pub const BELGIAN_LAMBERT72: Epsg = Epsg::new(31370);
}

/// Opaque description of a coordinate reference system.
///
/// The axis types only carry this value around and hand it to the
/// reprojection backend, they never interpret its contents themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crs {
    Epsg(Epsg),
    /// A proj string, a WKT string or an `EPSG:xxxx` identifier.
    Definition(String),
}

impl Crs {
    pub fn from_epsg(epsg: impl Into<Epsg>) -> Self {
        Crs::Epsg(epsg.into())
    }

    pub fn from_definition(def: impl Into<String>) -> Self {
        Crs::Definition(def.into())
    }

    /// The EPSG code of the descriptor if it carries one.
    pub fn epsg(&self) -> Option<Epsg> {
        match self {
            Crs::Epsg(epsg) => Some(*epsg),
            Crs::Definition(def) => def
                .strip_prefix("EPSG:")
                .and_then(|code| code.parse::<u16>().ok().map(Epsg::from))
                .or_else(|| epsg_from_wkt(def)),
        }
    }

    /// Resolves the descriptor to a proj string for the projection backend.
    pub fn to_proj_string(&self) -> Result<String> {
        match self {
            Crs::Epsg(epsg) => proj_string_from_epsg(*epsg),
            Crs::Definition(def) => {
                if let Some(epsg) = def.strip_prefix("EPSG:").and_then(|code| code.parse::<u16>().ok()) {
                    return proj_string_from_epsg(Epsg::new(epsg));
                }

                if is_wkt_string(def) {
                    // If the WKT carries an EPSG authority, prefer the crs-definitions
                    // entry for that code as it gives more similar results to osgeo/proj
                    if let Some(epsg) = epsg_from_wkt(def) {
                        return proj_string_from_epsg(epsg);
                    }

                    return proj4wkt::wkt_to_projstring(def)
                        .map_err(|e| Error::Projection(format!("Failed to parse WKT definition ({e})")));
                }

                Ok(def.clone())
            }
        }
    }
}

impl From<Epsg> for Crs {
    fn from(epsg: Epsg) -> Self {
        Crs::Epsg(epsg)
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Epsg(epsg) => write!(f, "{epsg}"),
            Crs::Definition(def) => write!(f, "{def}"),
        }
    }
}

fn proj_string_from_epsg(epsg: Epsg) -> Result<String> {
    crs_definitions::from_code(epsg.code())
        .map(|def| def.proj4.to_string())
        .ok_or_else(|| Error::Projection(format!("Failed to generate proj string for {epsg}")))
}

const WKT_ROOTS: [&str; 7] = ["GEOGCS[", "PROJCS[", "GEOCCS[", "VERT_CS[", "LOCAL_CS[", "COMPD_CS[", "FITTED_C["];
const WKT2_ROOTS: [&str; 9] = [
    "GEODCRS[",
    "GEOGCRS[",
    "PROJCRS[",
    "VERTCRS[",
    "ENGCRS[",
    "COMPOUNDCRS[",
    "BOUNDCRS[",
    "PARAMETRICCRS[",
    "TIMECRS[",
];

fn is_wkt_string(s: &str) -> bool {
    WKT_ROOTS.iter().any(|&root| s.starts_with(root)) || WKT2_ROOTS.iter().any(|&root| s.starts_with(root))
}

fn epsg_from_wkt(s: &str) -> Option<Epsg> {
    if !is_wkt_string(s) {
        return None;
    }

    let builder = proj4wkt::Builder;
    match builder.parse(s).ok()? {
        proj4wkt::builder::Node::PROJCRS(crs) => crs
            .projection
            .authority
            .as_ref()
            .and_then(|auth| auth.code.parse::<u16>().ok())
            .map(Epsg::from),
        proj4wkt::builder::Node::GEOGCRS(crs) => crs
            .authority
            .as_ref()
            .and_then(|auth| auth.code.parse::<u16>().ok())
            .map(Epsg::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_display() {
        assert_eq!(epsg::WGS84.to_string(), "EPSG:4326");
        assert_eq!(Crs::from_epsg(epsg::BELGIAN_LAMBERT72).to_string(), "EPSG:31370");
    }

    #[test]
    fn proj_string_from_epsg_code() -> crate::Result<()> {
        let proj = Crs::from_epsg(epsg::WGS84).to_proj_string()?;
        assert!(proj.contains("+proj=longlat"));

        let proj = Crs::from_definition("EPSG:3857").to_proj_string()?;
        assert!(proj.contains("+proj=merc"));

        Ok(())
    }

    #[test]
    fn proj_string_passthrough() -> crate::Result<()> {
        let def = "+proj=longlat +datum=WGS84 +no_defs";
        assert_eq!(Crs::from_definition(def).to_proj_string()?, def);
        Ok(())
    }

    #[test]
    fn proj_string_from_wkt() -> crate::Result<()> {
        let wkt = crs_definitions::from_code(epsg::WGS84.code())
            .map(|def| def.wkt.to_string())
            .expect("Failed to get WKT for WGS84");

        let crs = Crs::from_definition(wkt);
        assert_eq!(crs.epsg(), Some(epsg::WGS84));
        assert!(crs.to_proj_string()?.contains("+proj=longlat"));

        Ok(())
    }

    #[test]
    fn unknown_epsg_code_fails() {
        assert!(Crs::from_epsg(Epsg::new(1)).to_proj_string().is_err());
    }
}

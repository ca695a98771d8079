use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid axis configuration: {0}")]
    Configuration(String),
    #[error("Unsupported raster geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("Projection error: {0}")]
    Projection(String),
    #[error("No exact coordinate match for {0}")]
    NoExactMatch(f64),
    #[error("Coordinate {0} is outside the axis coverage")]
    OutOfBounds(f64),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<proj4rs::errors::Error> for Error {
    fn from(err: proj4rs::errors::Error) -> Self {
        Error::Projection(err.to_string())
    }
}

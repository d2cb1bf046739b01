//! The data types shared by loading and analysis.

pub mod math;
pub mod game;
pub mod clock;
pub mod frame;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    InvalidPolygon(usize),
    #[error("z band lower bound {0} is above upper bound {1}")]
    InvertedBand(f64, f64),
    #[error("malformed clock time {0:?}, expected \"M:SS\"")]
    MalformedClock(String),
}

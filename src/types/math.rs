use serde::{Deserialize, Serialize};

use super::TypeError;

/// A telemetry sample position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector {x, y, z}
    }
}

////////////////
/// VectorXY

/// A point on the map plane. Deserialises from an `[x, y]` pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct VectorXY {
    pub x: f64,
    pub y: f64
}

impl From<[f64; 2]> for VectorXY {
    fn from(value: [f64; 2]) -> Self {
        VectorXY { x: value[0], y: value[1] }
    }
}

impl From<(f64, f64)> for VectorXY {
    fn from(value: (f64, f64)) -> Self {
        VectorXY { x: value.0, y: value.1 }
    }
}

impl From<VectorXY> for [f64; 2] {
    fn from(vec: VectorXY) -> Self {
        [vec.x, vec.y]
    }
}

impl VectorXY {
    pub fn new(x: f64, y: f64) -> Self {
        VectorXY {x, y}
    }
}

/////////////////////////////////////////////
/// POLYGON
/// /////////////////////////////////////////

pub const MIN_POLYGON_VERTICES: usize = 3;

/// A closed ring of map-plane vertices. The last vertex connects back
/// to the first. Always holds at least [`MIN_POLYGON_VERTICES`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<VectorXY>", into = "Vec<VectorXY>")]
pub struct Polygon {
    vertices: Vec<VectorXY>,
}

impl Polygon {
    pub fn new<I, V>(vertices: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<VectorXY>,
    {
        let vertices: Vec<VectorXY> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(TypeError::InvalidPolygon(vertices.len()));
        }

        Ok(Polygon { vertices })
    }

    pub fn vertices(&self) -> &[VectorXY] {
        &self.vertices
    }

    /// Ring edges as `(v[i], v[i - 1])`, with the first vertex paired
    /// to the last.
    pub fn edges(&self) -> impl Iterator<Item = (VectorXY, VectorXY)> + '_ {
        let last = self.vertices.len() - 1;
        self.vertices
            .iter()
            .enumerate()
            .map(move |(i, v)| (*v, self.vertices[if i == 0 { last } else { i - 1 }]))
    }

    /// (min, max) corners of the axis-aligned bounding box.
    pub fn bounds(&self) -> (VectorXY, VectorXY) {
        self.vertices.iter().fold(
            (self.vertices[0], self.vertices[0]),
            |(lo, hi), v| (
                VectorXY::new(f64::min(lo.x, v.x), f64::min(lo.y, v.y)),
                VectorXY::new(f64::max(hi.x, v.x), f64::max(hi.y, v.y)),
            ),
        )
    }
}

impl TryFrom<Vec<VectorXY>> for Polygon {
    type Error = TypeError;
    fn try_from(value: Vec<VectorXY>) -> Result<Self, Self::Error> {
        Polygon::new(value)
    }
}

impl From<Polygon> for Vec<VectorXY> {
    fn from(value: Polygon) -> Self {
        value.vertices
    }
}

/////////////////////////////////////////////
/// Z BAND
/// /////////////////////////////////////////

pub const DEFAULT_Z_LOWER: f64 = 285.0;
pub const DEFAULT_Z_UPPER: f64 = 421.0;

/// Inclusive vertical slice of the map, usually one floor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ZBand {
    pub lower: f64,
    pub upper: f64,
}

impl Default for ZBand {
    fn default() -> Self {
        ZBand { lower: DEFAULT_Z_LOWER, upper: DEFAULT_Z_UPPER }
    }
}

impl ZBand {
    pub fn new(lower: f64, upper: f64) -> Result<Self, TypeError> {
        if lower > upper {
            return Err(TypeError::InvertedBand(lower, upper));
        }
        Ok(ZBand { lower, upper })
    }
}

//! Clipping geometries rendered in WKT-like form.

use std::fmt;
use std::str::FromStr;

use wcps_common::{WcpsError, WcpsResult};

/// A coordinate pair, rendered as `"lat long"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub lat: f64,
    pub long: f64,
}

impl Vertex {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((lat, long): (f64, f64)) -> Self {
        Self { lat, long }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lat, self.long)
    }
}

/// Supported clipping shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Polygon,
    Multipolygon,
    LineString,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Multipolygon => "Multipolygon",
            ShapeKind::LineString => "LineString",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = WcpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polygon" => Ok(ShapeKind::Polygon),
            "multipolygon" => Ok(ShapeKind::Multipolygon),
            "linestring" => Ok(ShapeKind::LineString),
            _ => Err(WcpsError::not_implemented(format!(
                "Clipping type {} not supported!",
                s
            ))),
        }
    }
}

/// A clipping geometry. The variant fixes the nesting depth of its vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipShape {
    Polygon(Vec<Vertex>),
    Multipolygon(Vec<Vec<Vertex>>),
    LineString(Vec<Vertex>),
}

fn collect_vertices<I, V>(vertices: I) -> Vec<Vertex>
where
    I: IntoIterator<Item = V>,
    V: Into<Vertex>,
{
    vertices.into_iter().map(Into::into).collect()
}

fn join_vertices(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl ClipShape {
    pub fn polygon<I, V>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vertex>,
    {
        ClipShape::Polygon(collect_vertices(vertices))
    }

    pub fn multipolygon<P, I, V>(polygons: P) -> Self
    where
        P: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Vertex>,
    {
        ClipShape::Multipolygon(polygons.into_iter().map(collect_vertices).collect())
    }

    pub fn line_string<I, V>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vertex>,
    {
        ClipShape::LineString(collect_vertices(vertices))
    }

    /// Build a shape from a kind and nested vertex lists.
    ///
    /// Polygon and LineString take exactly one vertex list, Multipolygon one
    /// list per polygon.
    pub fn from_rings(kind: ShapeKind, mut rings: Vec<Vec<Vertex>>) -> WcpsResult<Self> {
        match kind {
            ShapeKind::Multipolygon => Ok(ClipShape::Multipolygon(rings)),
            ShapeKind::Polygon | ShapeKind::LineString => {
                if rings.len() != 1 {
                    return Err(WcpsError::InvalidArgument(format!(
                        "{} takes a single vertex list, got {}",
                        kind.name(),
                        rings.len()
                    )));
                }
                let vertices = rings.remove(0);
                Ok(match kind {
                    ShapeKind::Polygon => ClipShape::Polygon(vertices),
                    _ => ClipShape::LineString(vertices),
                })
            }
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ClipShape::Polygon(_) => ShapeKind::Polygon,
            ClipShape::Multipolygon(_) => ShapeKind::Multipolygon,
            ClipShape::LineString(_) => ShapeKind::LineString,
        }
    }

    pub fn validate(&self) -> WcpsResult<()> {
        let rings: Vec<&Vec<Vertex>> = match self {
            ClipShape::Polygon(v) | ClipShape::LineString(v) => vec![v],
            ClipShape::Multipolygon(polys) => {
                if polys.is_empty() {
                    return Err(WcpsError::InvalidArgument(
                        "Multipolygon needs at least one polygon".to_string(),
                    ));
                }
                polys.iter().collect()
            }
        };

        for ring in rings {
            if ring.is_empty() {
                return Err(WcpsError::InvalidArgument(format!(
                    "{} vertex list must not be empty",
                    self.kind().name()
                )));
            }
            if let Some(bad) = ring
                .iter()
                .find(|v| !v.lat.is_finite() || !v.long.is_finite())
            {
                return Err(WcpsError::InvalidArgument(format!(
                    "Non-finite vertex: {}",
                    bad
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ClipShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipShape::Polygon(vertices) => write!(f, "POLYGON(({}))", join_vertices(vertices)),
            ClipShape::Multipolygon(polys) => {
                let groups = polys
                    .iter()
                    .map(|poly| format!("(({}))", join_vertices(poly)))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "Multipolygon({})", groups)
            }
            ClipShape::LineString(vertices) => write!(f, "LineString({})", join_vertices(vertices)),
        }
    }
}

/// A clip record: geometry plus optional CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub shape: ClipShape,
    pub crs: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_display() {
        let shape = ClipShape::polygon([(-12.3829, 132.0117), (-33.4314, 120.4102)]);
        assert_eq!(shape.to_string(), "POLYGON((-12.3829 132.0117,-33.4314 120.4102))");
    }

    #[test]
    fn test_line_string_display() {
        let shape = ClipShape::line_string([(1.0, 2.0), (3.0, 4.5)]);
        assert_eq!(shape.to_string(), "LineString(1 2,3 4.5)");
    }

    #[test]
    fn test_shape_kind_parse() {
        assert_eq!("Polygon".parse::<ShapeKind>().unwrap(), ShapeKind::Polygon);
        assert_eq!("LINESTRING".parse::<ShapeKind>().unwrap(), ShapeKind::LineString);
        let err = "Circle".parse::<ShapeKind>().unwrap_err();
        assert!(matches!(err, WcpsError::NotImplemented(_)));
    }

    #[test]
    fn test_from_rings_structure() {
        let ring = vec![Vertex::new(1.0, 2.0), Vertex::new(3.0, 4.0)];

        let poly = ClipShape::from_rings(ShapeKind::Polygon, vec![ring.clone()]).unwrap();
        assert_eq!(poly.kind(), ShapeKind::Polygon);

        let multi =
            ClipShape::from_rings(ShapeKind::Multipolygon, vec![ring.clone(), ring.clone()]).unwrap();
        assert!(matches!(multi, ClipShape::Multipolygon(ref p) if p.len() == 2));

        let err = ClipShape::from_rings(ShapeKind::LineString, vec![ring.clone(), ring]).unwrap_err();
        assert!(matches!(err, WcpsError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate() {
        assert!(ClipShape::Polygon(vec![]).validate().is_err());
        assert!(ClipShape::Multipolygon(vec![]).validate().is_err());
        assert!(ClipShape::Multipolygon(vec![vec![]]).validate().is_err());
        assert!(ClipShape::line_string([(f64::NAN, 1.0)]).validate().is_err());
        assert!(ClipShape::polygon([(1.0, 1.0)]).validate().is_ok());
    }
}

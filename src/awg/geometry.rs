//! COORD payloads.
//!
//! A COORD payload starts with a `coordKind` byte that picks both the layout of the
//! numbers that follow and the [`GeometryKind`] they are labelled with:
//!
//! | `coordKind` | Layout                                          | Kind      |
//! | ---         | ---                                             | ---       |
//! | `1`         | `f32 x, f32 y`                                  | `Point`   |
//! | `4`         | `i32` groups, each `i32` count then `(x, y)`s   | `Line`    |
//! | `2`, `3`    | `i32` count then `(x, y)`s                      | `Polygon` |
//! | otherwise   | as `4`                                          | `Polygon` |

use crate::{
    encoding::{cursor::Cursor, Result, Serializer},
    errors::{DecodingError, EncodingError},
};
use failure::{bail, Error};

/// `coordKind` of a single point.
pub const KIND_POINT: u8 = 1;
/// `coordKind` of a single flat ring.
pub const KIND_RING: u8 = 2;
/// Alternative `coordKind` of a single flat ring.
pub const KIND_RING_ALT: u8 = 3;
/// `coordKind` of grouped lines.
pub const KIND_LINES: u8 = 4;
/// A `coordKind` outside the named ones, read as grouped polygon rings.
pub const KIND_POLYGON_RINGS: u8 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Default)]
/// A planar coordinate.
pub struct Coord {
    /// Horizontal.
    pub x: f32,
    /// Vertical.
    pub y: f32,
}

impl Coord {
    pub fn new(x: f32, y: f32) -> Self { Coord { x, y } }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl From<(f32, f32)> for Coord {
    fn from((x, y): (f32, f32)) -> Self { Coord { x, y } }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// What a geometry depicts.
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

#[derive(Clone, Debug, PartialEq)]
/// The coordinates of a geometry, nested as deep as its `coordKind` says.
pub enum CoordTree {
    Point(Coord),
    Ring(Vec<Coord>),
    Rings(Vec<Vec<Coord>>),
}

impl CoordTree {
    /// The `coordKind` that reads back as this tree when no kind label is kept.
    pub fn default_coord_kind(&self) -> u8 {
        match self {
            CoordTree::Point(_) => KIND_POINT,
            CoordTree::Ring(_) => KIND_RING,
            CoordTree::Rings(_) => KIND_LINES,
        }
    }

    /// Total number of coordinates.
    pub fn len(&self) -> usize {
        match self {
            CoordTree::Point(_) => 1,
            CoordTree::Ring(r) => r.len(),
            CoordTree::Rings(rs) => rs.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub(crate) fn write(&self, kind: u8, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
        out.put_u8(kind);
        match self {
            CoordTree::Point(c) => write_coord(*c, out),
            CoordTree::Ring(ring) => write_ring(ring, out)?,
            CoordTree::Rings(rings) => {
                out.put_i32(count(rings.len(), "ring groups")?);
                for ring in rings {
                    write_ring(ring, out)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Feature geometry: a kind label and its coordinates.
pub struct Geometry {
    pub kind: GeometryKind,
    pub coordinates: CoordTree,
}

impl Geometry {
    /// A single point.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::awg::geometry::*;
    ///
    /// let g = Geometry::point(10.5, 20.25);
    ///
    /// assert_eq!(g.kind, GeometryKind::Point);
    /// assert_eq!(g.coord_kind().unwrap(), KIND_POINT);
    /// ```
    pub fn point(x: f32, y: f32) -> Self {
        Geometry {
            kind: GeometryKind::Point,
            coordinates: CoordTree::Point(Coord::new(x, y)),
        }
    }

    /// The `coordKind` byte that decodes back to this geometry.
    ///
    /// Fails for pairings no `coordKind` produces, such as a line over a flat ring.
    pub fn coord_kind(&self) -> std::result::Result<u8, Error> {
        match (self.kind, &self.coordinates) {
            (GeometryKind::Point, CoordTree::Point(_)) => Ok(KIND_POINT),
            (GeometryKind::Line, CoordTree::Rings(_)) => Ok(KIND_LINES),
            (GeometryKind::Polygon, CoordTree::Ring(_)) => Ok(KIND_RING),
            (GeometryKind::Polygon, CoordTree::Rings(_)) => Ok(KIND_POLYGON_RINGS),
            (kind, tree) => {
                bail!(EncodingError(format!(
                    "no coordKind reads back as {:?} over {}",
                    kind,
                    tree_name(tree)
                )))
            }
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
        let kind = self.coord_kind()?;
        self.coordinates.write(kind, out)
    }
}

fn tree_name(tree: &CoordTree) -> &'static str {
    match tree {
        CoordTree::Point(_) => "a point",
        CoordTree::Ring(_) => "a flat ring",
        CoordTree::Rings(_) => "grouped rings",
    }
}

fn count(n: usize, what: &str) -> std::result::Result<i32, Error> {
    if n > i32::max_value() as usize {
        bail!(EncodingError(format!("too many {} ({})", what, n)))
    }
    Ok(n as i32)
}

fn write_coord(c: Coord, out: &mut Vec<u8>) {
    out.put_f32(c.x);
    out.put_f32(c.y);
}

fn write_ring(ring: &[Coord], out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    out.put_i32(count(ring.len(), "points")?);
    for c in ring {
        write_coord(*c, out);
    }
    Ok(())
}

fn read_count(cur: &mut Cursor<'_>, what: &str) -> Result<usize> {
    let offset = cur.position();
    let n = cur.read_i32()?;
    if n < 0 {
        return Err(DecodingError::schema(
            offset,
            &format!("negative {} count {}", what, n),
        ));
    }
    Ok(n as usize)
}

fn read_point(cur: &mut Cursor<'_>) -> Result<Coord> {
    let x = cur.read_f32()?;
    let y = cur.read_f32()?;
    Ok(Coord { x, y })
}

fn read_ring(cur: &mut Cursor<'_>) -> Result<Vec<Coord>> {
    let n = read_count(cur, "point")?;
    // a count the payload cannot hold fails on the first missing point
    let mut ring = Vec::with_capacity(n.min(cur.remaining() / 8));
    for _ in 0..n {
        ring.push(read_point(cur)?);
    }
    Ok(ring)
}

fn read_rings(cur: &mut Cursor<'_>) -> Result<Vec<Vec<Coord>>> {
    let n = read_count(cur, "group")?;
    let mut rings = Vec::with_capacity(n.min(cur.remaining() / 4));
    for _ in 0..n {
        rings.push(read_ring(cur)?);
    }
    Ok(rings)
}

/// Reads a COORD payload.
pub fn read_geometry(cur: &mut Cursor<'_>) -> Result<Geometry> {
    let coord_kind = cur.read_u8()?;
    let (kind, coordinates) = match coord_kind {
        KIND_POINT => (GeometryKind::Point, CoordTree::Point(read_point(cur)?)),
        KIND_LINES => (GeometryKind::Line, CoordTree::Rings(read_rings(cur)?)),
        KIND_RING | KIND_RING_ALT => (GeometryKind::Polygon, CoordTree::Ring(read_ring(cur)?)),
        _ => (GeometryKind::Polygon, CoordTree::Rings(read_rings(cur)?)),
    };
    Ok(Geometry { kind, coordinates })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(g: &Geometry) -> Vec<u8> {
        let mut out = Vec::new();
        g.write(&mut out).unwrap();
        out
    }

    #[test]
    fn point_layout() {
        let out = encoded(&Geometry::point(10.5, 20.25));
        assert_eq!(out[0], KIND_POINT);
        assert_eq!(out.len(), 9);
        assert_eq!(
            read_geometry(&mut Cursor::new(&out)).unwrap(),
            Geometry::point(10.5, 20.25)
        );
    }

    #[test]
    fn kind_four_is_a_line() {
        let g = Geometry {
            kind: GeometryKind::Line,
            coordinates: CoordTree::Rings(vec![
                vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)],
                vec![Coord::new(2.0, 2.0)],
            ]),
        };
        let out = encoded(&g);
        assert_eq!(out[0], KIND_LINES);
        assert_eq!(read_geometry(&mut Cursor::new(&out)).unwrap(), g);
    }

    #[test]
    fn kinds_two_and_three_are_flat_rings() {
        for kind in &[KIND_RING, KIND_RING_ALT] {
            let mut out = vec![*kind];
            out.put_i32(1);
            out.put_f32(3.0);
            out.put_f32(4.0);
            assert_eq!(
                read_geometry(&mut Cursor::new(&out)).unwrap(),
                Geometry {
                    kind: GeometryKind::Polygon,
                    coordinates: CoordTree::Ring(vec![Coord::new(3.0, 4.0)]),
                }
            );
        }
    }

    #[test]
    fn other_kinds_are_grouped_polygons() {
        let mut out = vec![9];
        out.put_i32(1);
        out.put_i32(0);
        assert_eq!(
            read_geometry(&mut Cursor::new(&out)).unwrap(),
            Geometry {
                kind: GeometryKind::Polygon,
                coordinates: CoordTree::Rings(vec![vec![]]),
            }
        );
    }

    #[test]
    fn negative_counts_are_schema_mismatches() {
        let mut out = vec![KIND_RING];
        out.put_i32(-1);
        assert_eq!(
            read_geometry(&mut Cursor::new(&out)),
            Err(DecodingError::SchemaMismatch {
                offset: 1,
                detail: "negative point count -1".to_string(),
            })
        );
    }

    #[test]
    fn oversized_count_is_truncation() {
        let mut out = vec![KIND_LINES];
        out.put_i32(i32::max_value());
        assert!(read_geometry(&mut Cursor::new(&out))
            .unwrap_err()
            .is_truncation());
    }

    #[test]
    fn unreachable_pairings_fail_to_encode() {
        let g = Geometry {
            kind: GeometryKind::Line,
            coordinates: CoordTree::Ring(vec![]),
        };
        assert!(g.coord_kind().is_err());
        let g = Geometry {
            kind: GeometryKind::Polygon,
            coordinates: CoordTree::Point(Coord::default()),
        };
        assert!(g.coord_kind().is_err());
    }
}

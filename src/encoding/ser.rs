use super::{length::length_prefix, Color};
use crate::{
    awg::{geometry::Coord, EntityRef},
    errors::EncodingError,
};
use failure::{bail, Error};

/// An output buffer for the primitive encodings.
pub trait Serializer {
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);

    /// Add an [`i8`] to the output value.
    fn put_i8(&mut self, i: i8) { self.put_u8(i as u8) }

    /// Add a little-endian [`u16`] to the output value.
    fn put_u16(&mut self, u: u16) { self.put_slice(&u.to_le_bytes()) }

    /// Add a little-endian [`i16`] to the output value.
    fn put_i16(&mut self, i: i16) { self.put_slice(&i.to_le_bytes()) }

    /// Add a little-endian [`u32`] to the output value.
    fn put_u32(&mut self, u: u32) { self.put_slice(&u.to_le_bytes()) }

    /// Add a little-endian [`i32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `i: i32`  - The value to be added.
    fn put_i32(&mut self, i: i32) { self.put_slice(&i.to_le_bytes()) }

    /// Add a little-endian [`f32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `f: f32` - The value to be added.
    fn put_f32(&mut self, f: f32) { self.put_slice(&f.to_le_bytes()) }

    /// Add a [`bool`] as a single `0`/`1` byte.
    fn put_bool(&mut self, b: bool) { self.put_u8(b as u8) }

    /// Add a color, inverting its alpha.
    fn put_color(&mut self, c: Color) { self.put_slice(&[c.r, c.g, c.b, 255 - c.a]) }

    /// Add a mandatory length prefix. Unlike [`length_prefix`], zero is written as a
    /// literal `0` byte.
    ///
    /// # Arguments
    ///
    /// * `n: u32` - The byte count.
    fn put_len(&mut self, n: u32) {
        if n == 0 {
            self.put_u8(0)
        } else {
            self.put_slice(&length_prefix(n))
        }
    }

    /// Add a length-prefixed UTF-16LE string.
    ///
    /// The prefix is not checked: a string of 4 GiB or more of UTF-16 gets a wrapped
    /// length. Use [`Serializer::try_put_wstring`] where the input size is not bounded.
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The value to be added.
    fn put_wstring(&mut self, s: &str) {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.put_len(units.len().wrapping_mul(2) as u32);
        for unit in units {
            self.put_u16(unit);
        }
    }

    /// Add a length-prefixed UTF-16LE string, failing if its byte count does not fit
    /// in a length prefix.
    fn try_put_wstring(&mut self, s: &str) -> Result<(), Error> {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.put_len(checked_len(units.len().saturating_mul(2))?);
        for unit in units {
            self.put_u16(unit);
        }
        Ok(())
    }

    /// Add an optional trailing string. `None` and the empty string write nothing.
    fn put_opt_wstring(&mut self, s: Option<&str>) {
        match s {
            Some(s) if !s.is_empty() => self.put_wstring(s),
            _ => {}
        }
    }
}

impl Serializer for Vec<u8> {
    #[inline]
    fn put_u8(&mut self, u: u8) { bytes::BufMut::put_u8(self, u) }

    #[inline]
    fn put_slice(&mut self, slice: &[u8]) { bytes::BufMut::put_slice(self, slice) }

    #[inline]
    fn put_u16(&mut self, u: u16) { bytes::BufMut::put_u16_le(self, u) }

    #[inline]
    fn put_i32(&mut self, i: i32) { bytes::BufMut::put_i32_le(self, i) }

    #[inline]
    fn put_f32(&mut self, f: f32) { bytes::BufMut::put_f32_le(self, f) }
}

/// Converts a byte count to a length prefix value.
///
/// Fails when the count does not fit in the `u32` a length prefix can carry.
pub fn checked_len(n: usize) -> Result<u32, Error> {
    if n > u32::max_value() as usize {
        bail!(EncodingError(format!(
            "{} bytes do not fit in a length prefix",
            n
        )))
    }
    Ok(n as u32)
}

/// Encodes a list of entity references: a length-prefixed count, then
/// `(block_id, entity_id)` pairs.
///
/// # Example
///
/// ```
/// use awcodec::{awg::EntityRef, encoding::ser::encode_entity_refs};
///
/// let out = encode_entity_refs(&[EntityRef { block_id: 1, entity_id: 2 }]).unwrap();
///
/// assert_eq!(out, vec![1, 1, 0, 0, 0, 2, 0, 0, 0]);
/// ```
pub fn encode_entity_refs(refs: &[EntityRef]) -> Result<Vec<u8>, Error> {
    let count = checked_len(refs.len())?;
    let mut out = Vec::with_capacity(5 + refs.len() * 8);
    out.put_len(count);
    for r in refs {
        out.put_i32(r.block_id);
        out.put_i32(r.entity_id);
    }
    Ok(out)
}

/// Encodes a bounding box given as exactly four numbers `minx, miny, maxx, maxy`.
///
/// # Example
///
/// ```
/// use awcodec::encoding::ser::encode_extent;
///
/// assert_eq!(encode_extent(&[0.0, 0.0, 1.0, 1.0]).unwrap().len(), 16);
/// assert!(encode_extent(&[0.0, 0.0, 1.0]).is_err());
/// ```
pub fn encode_extent(extent: &[f32]) -> Result<Vec<u8>, Error> {
    if extent.len() != 4 {
        bail!(EncodingError(format!(
            "extent needs exactly 4 numbers, got {}",
            extent.len()
        )))
    }
    if let Some(bad) = extent.iter().find(|v| !v.is_finite()) {
        bail!(EncodingError(format!("extent holds non-finite value {}", bad)))
    }
    let mut out = Vec::with_capacity(16);
    for v in extent {
        out.put_f32(*v);
    }
    Ok(out)
}

/// Encodes a polygon outline: a length-prefixed point count, then `(x, y)` pairs.
pub fn encode_polygon(points: &[Coord]) -> Result<Vec<u8>, Error> {
    if points.len() < 3 {
        bail!(EncodingError(format!(
            "polygon needs at least 3 points, got {}",
            points.len()
        )))
    }
    if points.iter().any(|p| !p.is_finite()) {
        bail!(EncodingError::new("polygon holds a non-finite coordinate"))
    }
    let mut out = Vec::with_capacity(5 + points.len() * 8);
    out.put_len(points.len() as u32);
    for p in points {
        out.put_f32(p.x);
        out.put_f32(p.y);
    }
    Ok(out)
}

/// Encodes a circle as `x, y, radius`.
pub fn encode_circle(center: Coord, radius: f32) -> Result<Vec<u8>, Error> {
    if !center.is_finite() {
        bail!(EncodingError::new("circle center is not finite"))
    }
    if !radius.is_finite() || radius < 0.0 {
        bail!(EncodingError(format!("invalid circle radius {}", radius)))
    }
    let mut out = Vec::with_capacity(12);
    out.put_f32(center.x);
    out.put_f32(center.y);
    out.put_f32(radius);
    Ok(out)
}

/// Encodes a non-empty list of node type codes: a length-prefixed count, then one `i32`
/// each.
pub fn encode_node_types(types: &[i32]) -> Result<Vec<u8>, Error> {
    if types.is_empty() {
        bail!(EncodingError::new("node type list is empty"))
    }
    let mut out = Vec::with_capacity(5 + types.len() * 4);
    out.put_len(types.len() as u32);
    for t in types {
        out.put_i32(*t);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::cursor::Cursor;

    #[test]
    fn put_len_writes_literal_zero() {
        let out = &mut Vec::<u8>::new();
        out.put_len(0);
        assert_eq!(out.as_slice(), &[0]);
    }

    #[test]
    fn empty_wstring_is_one_byte() {
        let out = &mut Vec::<u8>::new();
        out.put_wstring("");
        assert_eq!(out.as_slice(), &[0]);
        assert_eq!(Cursor::new(out).read_wstring(), Ok(String::new()));
    }

    #[test]
    fn wstring_length_counts_bytes() {
        let out = &mut Vec::<u8>::new();
        out.put_wstring("ab");
        assert_eq!(out.as_slice(), &[4, b'a', 0, b'b', 0]);
    }

    #[test]
    fn optional_strings_are_omitted() {
        let out = &mut Vec::<u8>::new();
        out.put_opt_wstring(None);
        out.put_opt_wstring(Some(""));
        assert!(out.is_empty());
        out.put_opt_wstring(Some("x"));
        assert_eq!(out.as_slice(), &[2, b'x', 0]);
    }

    #[test]
    fn color_round_trips() {
        let c = Color {
            r: 10,
            g: 20,
            b: 30,
            a: 200,
        };
        let out = &mut Vec::<u8>::new();
        out.put_color(c);
        assert_eq!(out[3], 55);
        assert_eq!(Cursor::new(out).read_color(), Ok(c));
    }

    #[test]
    fn little_endian_scalars() {
        let out = &mut Vec::<u8>::new();
        out.put_i32(-2);
        out.put_u16(0x0102);
        out.put_bool(true);
        assert_eq!(out.as_slice(), &[0xfe, 0xff, 0xff, 0xff, 0x02, 0x01, 1]);
    }

    #[test]
    fn composite_shapes_are_validated() {
        assert!(encode_extent(&[0.0, 1.0, 2.0, 3.0, 4.0]).is_err());
        assert!(encode_extent(&[0.0, 1.0, std::f32::NAN, 3.0]).is_err());

        let tri = [Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), Coord::new(0.0, 1.0)];
        assert_eq!(encode_polygon(&tri).unwrap().len(), 1 + 3 * 8);
        assert!(encode_polygon(&tri[..2]).is_err());

        assert!(encode_circle(Coord::new(0.0, 0.0), -1.0).is_err());
        assert_eq!(encode_circle(Coord::new(0.0, 0.0), 2.5).unwrap().len(), 12);

        assert!(encode_node_types(&[]).is_err());
        assert_eq!(encode_node_types(&[7, 8]).unwrap(), vec![2, 7, 0, 0, 0, 8, 0, 0, 0]);
    }

    #[test]
    fn try_put_wstring_matches_put_wstring() {
        let (a, b) = (&mut Vec::<u8>::new(), &mut Vec::<u8>::new());
        a.put_wstring("héllo");
        b.try_put_wstring("héllo").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_lengths_are_rejected() {
        assert_eq!(checked_len(u32::max_value() as usize).unwrap(), u32::max_value());
        assert!(checked_len(u32::max_value() as usize + 1).is_err());
    }

    #[test]
    fn entity_refs_count_prefix() {
        assert_eq!(encode_entity_refs(&[]).unwrap(), vec![0]);
        let refs: Vec<EntityRef> = (0..300)
            .map(|i| EntityRef {
                block_id: i,
                entity_id: i,
            })
            .collect();
        let out = encode_entity_refs(&refs).unwrap();
        assert_eq!(&out[..3], &[253, 44, 1]);
        assert_eq!(out.len(), 3 + 300 * 8);
    }
}

//! MARK payloads: text annotations attached to a feature.

use super::{
    geometry::{read_geometry, CoordTree},
    put_block, read_block,
};
use crate::{
    encoding::{cursor::Cursor, Result, Serializer},
    tag,
};
use failure::Error;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
/// A text annotation.
pub struct Mark {
    /// Degrees, as stored.
    pub rotation: f32,
    pub text_height: f32,
    pub text: String,
    /// Where the text is anchored, when it is not anchored to the feature itself.
    pub coordinates: Option<CoordTree>,
    pub color: Option<String>,
}

impl Mark {
    pub(crate) fn write(&self, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
        out.put_f32(self.rotation);
        out.put_f32(self.text_height);
        out.put_wstring(&self.text);
        if let Some(tree) = &self.coordinates {
            let mut body = Vec::new();
            tree.write(tree.default_coord_kind(), &mut body)?;
            put_block(tag::COORD, &body, out)?;
        }
        out.put_opt_wstring(self.color.as_ref().map(String::as_str));
        Ok(())
    }
}

/// Reads a MARK payload.
///
/// The anchor block and the color are both optional. They cannot be confused: the anchor
/// starts with the COORD tag, which is odd, and a string's byte count never is.
pub fn read_mark(cur: &mut Cursor<'_>) -> Result<Mark> {
    let rotation = cur.read_f32()?;
    let text_height = cur.read_f32()?;
    let text = cur.read_wstring()?;

    let mut coordinates = None;
    if cur.peek_u8() == Some(tag::COORD) {
        let mut block = read_block(cur)?;
        coordinates = Some(read_geometry(&mut block.body)?.coordinates);
    }
    let color = cur.read_opt_wstring()?;

    if !cur.is_empty() {
        warn!(
            offset = cur.position(),
            left = cur.remaining(),
            "ignoring trailing bytes in MARK"
        );
    }

    Ok(Mark {
        rotation,
        text_height,
        text,
        coordinates,
        color,
    })
}

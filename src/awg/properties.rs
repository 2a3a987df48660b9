//! PROPERTIES payloads.
//!
//! Every payload starts with a `coordKind` byte, five shared `i32` fields, and a
//! schema-specific tail: points carry their symbol, lines and polygons carry the nodes
//! they connect. An optional color string closes the payload.

use super::geometry::{KIND_LINES, KIND_POINT};
use crate::encoding::{cursor::Cursor, Result, Serializer};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
/// Fields every feature carries.
pub struct SharedProperties {
    pub class_id: i32,
    pub layer_id: i32,
    pub sublayer_id: i32,
    pub node_type: i32,
    pub state: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
/// One end of a link.
pub struct NodeRef {
    pub block_id: i32,
    pub entity_id: i32,
    pub lineage_id: i32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// The schema-specific part of a feature's properties.
pub enum PropertySchema {
    /// Point features: the symbol drawn at the point.
    Point {
        symbol_id: i32,
        symbol_state: i32,
        /// Degrees.
        angle: f32,
        scale: f32,
    },
    /// Line and polygon features: the nodes at either end.
    Link { head: NodeRef, tail: NodeRef },
}

#[derive(Clone, Debug, PartialEq)]
/// Decoded PROPERTIES payload.
pub struct Properties {
    pub shared: SharedProperties,
    pub schema: PropertySchema,
    /// Omitted on the wire when empty.
    pub color: Option<String>,
}

impl Properties {
    /// The `coordKind` byte written ahead of the fields.
    pub fn coord_kind(&self) -> u8 {
        match self.schema {
            PropertySchema::Point { .. } => KIND_POINT,
            PropertySchema::Link { .. } => KIND_LINES,
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(self.coord_kind());
        let s = &self.shared;
        for v in &[s.class_id, s.layer_id, s.sublayer_id, s.node_type, s.state] {
            out.put_i32(*v);
        }
        match self.schema {
            PropertySchema::Point {
                symbol_id,
                symbol_state,
                angle,
                scale,
            } => {
                out.put_i32(symbol_id);
                out.put_i32(symbol_state);
                out.put_f32(angle);
                out.put_f32(scale);
            }
            PropertySchema::Link { head, tail } => {
                write_node(head, out);
                write_node(tail, out);
            }
        }
        out.put_opt_wstring(self.color.as_ref().map(String::as_str));
    }
}

fn write_node(n: NodeRef, out: &mut Vec<u8>) {
    out.put_i32(n.block_id);
    out.put_i32(n.entity_id);
    out.put_i32(n.lineage_id);
}

fn read_node(cur: &mut Cursor<'_>) -> Result<NodeRef> {
    Ok(NodeRef {
        block_id: cur.read_i32()?,
        entity_id: cur.read_i32()?,
        lineage_id: cur.read_i32()?,
    })
}

/// Reads a PROPERTIES payload.
pub fn read_properties(cur: &mut Cursor<'_>) -> Result<Properties> {
    let coord_kind = cur.read_u8()?;
    let shared = SharedProperties {
        class_id: cur.read_i32()?,
        layer_id: cur.read_i32()?,
        sublayer_id: cur.read_i32()?,
        node_type: cur.read_i32()?,
        state: cur.read_i32()?,
    };
    let schema = if coord_kind == KIND_POINT {
        PropertySchema::Point {
            symbol_id: cur.read_i32()?,
            symbol_state: cur.read_i32()?,
            angle: cur.read_f32()?,
            scale: cur.read_f32()?,
        }
    } else {
        PropertySchema::Link {
            head: read_node(cur)?,
            tail: read_node(cur)?,
        }
    };
    let color = cur.read_opt_wstring()?;
    Ok(Properties {
        shared,
        schema,
        color,
    })
}

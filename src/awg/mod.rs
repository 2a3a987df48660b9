//! # AWG: the feature-stream format
//!
//! An AWG stream is a run of blocks framed as a tag byte, a little-endian **signed**
//! `i32` length and that many payload bytes. A FILE block describes where the features
//! came from; each FEATURE block is itself a run of blocks with the same framing
//! holding the feature's geometry, properties, marks and source node references.
//!
//! Unknown tags are skipped at every level, and a repeated child block replaces the
//! earlier one, except MARKS whose marks accumulate.
//!
//! # Example
//!
//! ```
//! use awcodec::awg::{self, geometry::Geometry, Feature, FeatureRecord};
//!
//! let record = FeatureRecord {
//!     source_id: 1,
//!     block_id: 3,
//!     entity_id: 100,
//!     title: "T".to_string(),
//!     features: vec![Feature::with_geometry(Geometry::point(10.5, 20.25))],
//! };
//!
//! let enc = awg::encode_full(&record).unwrap();
//!
//! assert_eq!(awg::decode(&enc).unwrap(), record);
//! ```

pub mod geometry;
pub mod mark;
pub mod properties;

use self::{
    geometry::{read_geometry, Geometry},
    mark::{read_mark, Mark},
    properties::{read_properties, Properties},
};
use crate::{
    encoding::{cursor::Cursor, Result, Serializer},
    errors::{DecodingError, EncodingError},
    options::DecodeOptions,
    tag::{self, TypeTag},
    Value,
};
use failure::{bail, Error};
use tracing::{debug, trace, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
/// A `(block, entity)` pair naming an entity somewhere else in the data set.
pub struct EntityRef {
    pub block_id: i32,
    pub entity_id: i32,
}

impl EntityRef {
    /// Reads an entity reference out of an object holding integer `blockId` and
    /// `entityId` keys.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::{awg::EntityRef, vecmap::VecMap, Value};
    ///
    /// let mut m = VecMap::new();
    /// m.insert("blockId".to_string(), Value::Int(4));
    /// m.insert("entityId".to_string(), Value::Int(9));
    ///
    /// let r = EntityRef::from_value(&Value::Object(m)).unwrap();
    /// assert_eq!(r, EntityRef { block_id: 4, entity_id: 9 });
    ///
    /// assert!(EntityRef::from_value(&Value::Int(4)).is_err());
    /// ```
    pub fn from_value(v: &Value) -> std::result::Result<Self, Error> {
        let obj = v.to_object()?;
        let field = |name: &str| -> std::result::Result<i32, Error> {
            match obj.get(name) {
                Some(Value::Int(i)) => Ok(*i),
                Some(other) => {
                    Err(EncodingError(format!("`{}` is not an integer: {}", name, other)).into())
                }
                None => Err(EncodingError(format!("`{}` is missing", name)).into()),
            }
        };
        Ok(EntityRef {
            block_id: field("blockId")?,
            entity_id: field("entityId")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
/// One feature of a stream. Every part is optional.
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<Properties>,
    pub marks: Vec<Mark>,
    pub source_node_refs: Vec<EntityRef>,
}

impl Feature {
    /// A feature with geometry and nothing else.
    pub fn with_geometry(geometry: Geometry) -> Self {
        Feature {
            geometry: Some(geometry),
            ..Feature::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
/// A decoded feature stream.
pub struct FeatureRecord {
    pub source_id: i32,
    pub block_id: i32,
    pub entity_id: i32,
    pub title: String,
    pub features: Vec<Feature>,
}

/// One framed block.
pub(crate) struct Block<'a> {
    pub tag: u8,
    /// Position of the tag byte.
    pub offset: usize,
    pub body: Cursor<'a>,
}

/// Reads a `tag, i32 length, payload` block header and slices out its payload.
pub(crate) fn read_block<'a>(cur: &mut Cursor<'a>) -> Result<Block<'a>> {
    let offset = cur.position();
    let tag = cur.read_u8()?;
    let length = cur.read_i32()?;
    if length < 0 {
        return Err(DecodingError::InvalidBlockLength {
            offset: offset + 1,
            length,
        });
    }
    let body = cur.sub_cursor(length as usize)?;
    trace!(tag, offset, length, "AWG block");
    Ok(Block { tag, offset, body })
}

/// Writes a `tag, i32 length, payload` block.
pub(crate) fn put_block(tag: u8, body: &[u8], out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    if body.len() > i32::max_value() as usize {
        bail!(EncodingError(format!(
            "block {} is {} bytes, more than a block length can hold",
            tag,
            body.len()
        )))
    }
    out.put_u8(tag);
    out.put_i32(body.len() as i32);
    out.put_slice(body);
    Ok(())
}

fn skip_block(block: &Block<'_>, context: &str) {
    match TypeTag::from_byte(block.tag) {
        Some(t) => {
            debug!(tag = block.tag, offset = block.offset, kind = ?t, context, "skipping AWG block")
        }
        None => {
            warn!(
                tag = block.tag,
                offset = block.offset,
                len = block.body.remaining(),
                context,
                "skipping unknown AWG tag"
            )
        }
    }
}

fn read_source_nodes(cur: &mut Cursor<'_>) -> Result<Vec<EntityRef>> {
    let count = cur.read_u8()?;
    let mut refs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        refs.push(EntityRef {
            block_id: cur.read_i32()?,
            entity_id: cur.read_i32()?,
        });
    }
    Ok(refs)
}

fn read_marks(cur: &mut Cursor<'_>, marks: &mut Vec<Mark>) -> Result<()> {
    while !cur.is_empty() {
        let mut block = read_block(cur)?;
        match TypeTag::from_byte(block.tag) {
            Some(TypeTag::Mark) => marks.push(read_mark(&mut block.body)?),
            _ => skip_block(&block, "MARKS"),
        }
    }
    Ok(())
}

fn read_feature(cur: &mut Cursor<'_>) -> Result<Feature> {
    let mut feature = Feature::default();
    while !cur.is_empty() {
        let mut block = read_block(cur)?;
        match TypeTag::from_byte(block.tag) {
            Some(TypeTag::Coord) => feature.geometry = Some(read_geometry(&mut block.body)?),
            Some(TypeTag::Properties) => {
                feature.properties = Some(read_properties(&mut block.body)?)
            }
            Some(TypeTag::Marks) => read_marks(&mut block.body, &mut feature.marks)?,
            Some(TypeTag::SourceNode) => {
                feature.source_node_refs = read_source_nodes(&mut block.body)?
            }
            _ => skip_block(&block, "FEATURE"),
        }
    }
    Ok(feature)
}

fn read_file(cur: &mut Cursor<'_>, record: &mut FeatureRecord) -> Result<()> {
    record.source_id = cur.read_i32()?;
    record.block_id = cur.read_i32()?;
    record.entity_id = cur.read_i32()?;
    record.title = cur.read_wstring()?;
    Ok(())
}

/// Decodes an AWG buffer with the default [`DecodeOptions`].
pub fn decode(data: &[u8]) -> Result<FeatureRecord> { decode_with(data, &DecodeOptions::default()) }

/// Decodes an AWG buffer.
///
/// Fails with [`DecodingError::NotAFeatureStream`] when the buffer is well framed but
/// holds neither a FILE nor a FEATURE block. AWG nesting is fixed, so `opts` only
/// matters to callers threading one set of options through both formats.
///
/// # Arguments
///
/// * `data: &[u8]` - The whole buffer.
/// * `opts: &DecodeOptions` - Limits for this call.
pub fn decode_with(data: &[u8], _opts: &DecodeOptions) -> Result<FeatureRecord> {
    let mut cur = Cursor::new(data);
    let mut record = FeatureRecord::default();
    let mut feature_shaped = false;

    while !cur.is_empty() {
        let mut block = read_block(&mut cur)?;
        match TypeTag::from_byte(block.tag) {
            Some(TypeTag::File) => {
                read_file(&mut block.body, &mut record)?;
                feature_shaped = true;
            }
            Some(TypeTag::Feature) => {
                record.features.push(read_feature(&mut block.body)?);
                feature_shaped = true;
            }
            _ => skip_block(&block, "stream"),
        }
    }

    if feature_shaped {
        Ok(record)
    } else {
        Err(DecodingError::NotAFeatureStream)
    }
}

fn encode_feature(f: &Feature, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    let mut body = Vec::new();
    if let Some(g) = &f.geometry {
        g.write(&mut body)?;
        put_block(tag::COORD, &body, out)?;
    }
    if let Some(p) = &f.properties {
        body.clear();
        p.write(&mut body);
        put_block(tag::PROPERTIES, &body, out)?;
    }
    if !f.marks.is_empty() {
        let mut marks = Vec::new();
        for m in &f.marks {
            body.clear();
            m.write(&mut body)?;
            put_block(tag::MARK, &body, &mut marks)?;
        }
        put_block(tag::MARKS, &marks, out)?;
    }
    if !f.source_node_refs.is_empty() {
        if f.source_node_refs.len() > u8::max_value() as usize {
            bail!(EncodingError(format!(
                "{} source nodes, at most 255 fit",
                f.source_node_refs.len()
            )))
        }
        body.clear();
        body.put_u8(f.source_node_refs.len() as u8);
        for r in &f.source_node_refs {
            body.put_i32(r.block_id);
            body.put_i32(r.entity_id);
        }
        put_block(tag::SOURCE_NODE, &body, out)?;
    }
    Ok(())
}

/// Encodes a [`FeatureRecord`] as an AWG stream, appending to `out`: a FILE block, then
/// one FEATURE block per feature.
///
/// # Arguments
///
/// * `record: &FeatureRecord` - The record to be encoded.
/// * `out: &mut Vec<u8>` - Where the encoder output will be stored.
pub fn encode(record: &FeatureRecord, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    let mut body = Vec::new();
    body.put_i32(record.source_id);
    body.put_i32(record.block_id);
    body.put_i32(record.entity_id);
    body.put_wstring(&record.title);
    put_block(tag::FILE, &body, out)?;

    for f in &record.features {
        body.clear();
        encode_feature(f, &mut body)?;
        put_block(tag::FEATURE, &body, out)?;
    }
    Ok(())
}

/// Encodes a [`FeatureRecord`] into a fresh vector of bytes.
pub fn encode_full(record: &FeatureRecord) -> std::result::Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    encode(record, &mut out)?;
    Ok(out)
}

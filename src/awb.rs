//! # AWB: the object-graph format
//!
//! An AWB stream is a flat run of blocks, each a tag byte, a
//! [length prefix](crate::encoding::length) and that many payload bytes. A [`KEY`]
//! block names the value block that follows it; [`JSONOBJECT`] and [`JSONARRAY`]
//! payloads are themselves runs of blocks.
//!
//! At the top level a stream with keys is an object, a stream with a single un-keyed
//! value is that value.
//!
//! # Example
//!
//! ```
//! use awcodec::{awb, Value, vecmap::VecMap};
//!
//! let mut obj = VecMap::new();
//! obj.insert("a".to_string(), Value::Int(1));
//! obj.insert("b".to_string(), Value::from(vec![Value::Int(1), Value::Int(2)]));
//! let v = Value::Object(obj);
//!
//! let enc = awb::encode_full(&v).unwrap();
//!
//! assert_eq!(awb::decode(&enc).unwrap(), v);
//! ```

use crate::{
    encoding::{
        cursor::Cursor,
        de::decode_utf16,
        length::read_length,
        ser::checked_len,
        Result,
        Serializer,
    },
    errors::DecodingError,
    options::DecodeOptions,
    tag::{self, TypeTag},
    vecmap::VecMap,
    Value,
};
use failure::Error;
use tracing::{trace, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Region {
    Top,
    Object,
    Array,
}

/// Accumulates the values of one run of blocks.
struct Collector {
    region: Region,
    pending_key: Option<String>,
    entries: VecMap<String, Value>,
    items: Vec<Value>,
}

impl Collector {
    fn new(region: Region) -> Self {
        Collector {
            region,
            pending_key: None,
            entries: VecMap::new(),
            items: Vec::new(),
        }
    }

    fn key(&mut self, key: String, offset: usize) {
        if let Some(dangling) = self.pending_key.replace(key) {
            warn!(key = %dangling, offset, "AWB key without a value, dropping it");
        }
    }

    fn value(&mut self, v: Value, offset: usize) {
        match (self.pending_key.take(), self.region) {
            (Some(key), Region::Array) => {
                warn!(key = %key, offset, "AWB key inside an array, keeping only the value");
                self.items.push(v);
            }
            (Some(key), _) => {
                self.entries.insert(key, v);
            }
            (None, Region::Object) => {
                warn!(offset, "AWB value without a key inside an object, dropping it");
            }
            (None, _) => self.items.push(v),
        }
    }

    fn finish(self) -> Result<Value> {
        if let Some(dangling) = self.pending_key {
            warn!(key = %dangling, "AWB key at end of region without a value, dropping it");
        }
        match self.region {
            Region::Object => Ok(Value::Object(self.entries)),
            Region::Array => Ok(Value::Array(self.items)),
            Region::Top => {
                if !self.entries.is_empty() {
                    if !self.items.is_empty() {
                        warn!(
                            dropped = self.items.len(),
                            "AWB top level mixes keyed and un-keyed values, keeping the keyed ones"
                        );
                    }
                    return Ok(Value::Object(self.entries));
                }
                let mut items = self.items;
                match items.len() {
                    0 => Err(DecodingError::NoValue),
                    1 => Ok(items.remove(0)),
                    _ => Ok(Value::Array(items)),
                }
            }
        }
    }
}

fn decode_region(
    cur: &mut Cursor<'_>,
    region: Region,
    depth: usize,
    opts: &DecodeOptions,
) -> Result<Value> {
    let mut out = Collector::new(region);
    while !cur.is_empty() {
        let offset = cur.position();
        let tag = cur.read_u8()?;
        let len = read_length(cur)? as usize;
        let mut payload = cur.sub_cursor(len)?;
        trace!(tag, offset, len, "AWB block");

        match TypeTag::from_byte(tag) {
            Some(TypeTag::Key) => {
                let key = decode_utf16(payload.read_slice(len)?, offset)?;
                out.key(key, offset);
            }
            Some(t) if t.is_value() => {
                let v = decode_payload(t, &mut payload, offset, depth, opts)?;
                out.value(v, offset);
            }
            _ => warn!(tag, offset, len, "skipping unknown AWB tag"),
        }
    }
    out.finish()
}

fn decode_payload(
    t: TypeTag,
    payload: &mut Cursor<'_>,
    offset: usize,
    depth: usize,
    opts: &DecodeOptions,
) -> Result<Value> {
    match t {
        TypeTag::Str => {
            let len = payload.remaining();
            Ok(Value::Str(decode_utf16(payload.read_slice(len)?, offset)?))
        }
        TypeTag::Boolean => Ok(Value::Bool(payload.read_bool()?)),
        TypeTag::Int => Ok(Value::Int(payload.read_i32()?)),
        TypeTag::Float => Ok(Value::Float(payload.read_f32()?)),
        TypeTag::Object | TypeTag::Array => {
            if depth >= opts.max_depth {
                return Err(DecodingError::DepthLimitExceeded {
                    limit: opts.max_depth,
                });
            }
            let region = if t == TypeTag::Object {
                Region::Object
            } else {
                Region::Array
            };
            decode_region(payload, region, depth + 1, opts)
        }
        other => unreachable!("{:?} is not a value tag", other),
    }
}

/// Decodes an AWB buffer with the default [`DecodeOptions`].
///
/// An empty buffer is an empty object.
pub fn decode(data: &[u8]) -> Result<Value> { decode_with(data, &DecodeOptions::default()) }

/// Decodes an AWB buffer.
///
/// # Arguments
///
/// * `data: &[u8]` - The whole buffer.
/// * `opts: &DecodeOptions` - Limits for this call.
pub fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Value> {
    if data.is_empty() {
        return Ok(Value::Object(VecMap::new()));
    }
    decode_region(&mut Cursor::new(data), Region::Top, 0, opts)
}

fn encode_entries(m: &VecMap<String, Value>, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    for (k, v) in m {
        out.put_u8(tag::KEY);
        out.try_put_wstring(k)?;
        encode_block(v, out)?;
    }
    Ok(())
}

fn encode_nested(tag: u8, body: Vec<u8>, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    out.put_u8(tag);
    out.put_len(checked_len(body.len())?);
    out.put_slice(&body);
    Ok(())
}

fn encode_block(v: &Value, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    match v {
        Value::Str(s) => {
            out.put_u8(tag::STRING);
            out.try_put_wstring(s)?;
        }
        Value::Bool(b) => {
            out.put_u8(tag::BOOLEAN);
            out.put_len(1);
            out.put_bool(*b);
        }
        Value::Int(i) => {
            out.put_u8(tag::INT);
            out.put_len(4);
            out.put_i32(*i);
        }
        Value::Float(f) => {
            out.put_u8(tag::FLOAT);
            out.put_len(4);
            out.put_f32(*f);
        }
        Value::Object(m) => {
            let mut body = Vec::new();
            encode_entries(m, &mut body)?;
            encode_nested(tag::JSONOBJECT, body, out)?;
        }
        Value::Array(a) => {
            let mut body = Vec::new();
            for item in a {
                encode_block(item, &mut body)?;
            }
            encode_nested(tag::JSONARRAY, body, out)?;
        }
    }
    Ok(())
}

/// Encodes a [`Value`] as an AWB stream, appending to `out`.
///
/// A top-level object is written as bare key/value blocks, anything else as a single
/// block. Fails, possibly after writing part of the stream, when a string or nested
/// payload is too large for a length prefix.
///
/// # Arguments
///
/// * `v: &Value` - The value to be encoded.
/// * `out: &mut Vec<u8>` - Where the encoder output will be stored.
pub fn encode(v: &Value, out: &mut Vec<u8>) -> std::result::Result<(), Error> {
    match v {
        Value::Object(m) => encode_entries(m, out),
        other => encode_block(other, out),
    }
}

/// Encodes a [`Value`] into a fresh vector of bytes.
pub fn encode_full(v: &Value) -> std::result::Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    encode(v, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: Vec<(&str, Value)>) -> Value {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn small_object_layout() {
        let enc = encode_full(&obj(vec![("a", Value::Int(1))])).unwrap();
        assert_eq!(
            enc,
            vec![tag::KEY, 2, b'a', 0, tag::INT, 4, 1, 0, 0, 0]
        );
    }

    #[test]
    fn keeps_key_order() {
        let v = obj(vec![
            ("z", Value::Bool(true)),
            ("a", Value::Str("x".into())),
            ("m", Value::Float(0.5)),
        ]);
        let dec = decode(&encode_full(&v).unwrap()).unwrap();
        let keys: Vec<&String> = dec.to_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(dec, v);
    }

    #[test]
    fn bare_scalar_document() {
        let enc = encode_full(&Value::Int(-5)).unwrap();
        assert_eq!(enc[0], tag::INT);
        assert_eq!(decode(&enc).unwrap(), Value::Int(-5));
    }

    #[test]
    fn single_element_array_stays_an_array() {
        let v = Value::Array(vec![Value::Int(3)]);
        assert_eq!(decode(&encode_full(&v).unwrap()).unwrap(), v);
    }

    #[test]
    fn several_bare_values_become_an_array() {
        let mut enc = encode_full(&Value::Int(1)).unwrap();
        enc.extend(encode_full(&Value::Bool(false)).unwrap());
        assert_eq!(
            decode(&enc).unwrap(),
            Value::Array(vec![Value::Int(1), Value::Bool(false)])
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(decode(&[]).unwrap(), Value::Object(VecMap::new()));
        let v = obj(vec![
            ("o", Value::Object(VecMap::new())),
            ("a", Value::Array(vec![])),
            ("s", Value::Str(String::new())),
        ]);
        assert_eq!(decode(&encode_full(&v).unwrap()).unwrap(), v);
    }

    #[test]
    fn unknown_tags_are_skipped_in_sync() {
        let mut enc = vec![99, 3, 1, 2, 3];
        enc.extend(encode_full(&obj(vec![("k", Value::Int(7))])).unwrap());
        assert_eq!(decode(&enc).unwrap(), obj(vec![("k", Value::Int(7))]));
    }

    #[test]
    fn only_unknown_tags_is_no_value() {
        assert_eq!(decode(&[99, 1, 0]), Err(DecodingError::NoValue));
    }

    #[test]
    fn truncated_payload() {
        let mut enc = encode_full(&obj(vec![("k", Value::Str("hello".into()))])).unwrap();
        enc.truncate(enc.len() - 3);
        assert!(decode(&enc).unwrap_err().is_truncation());
    }

    #[test]
    fn short_int_payload_is_truncation() {
        assert!(decode(&[tag::INT, 2, 1, 0]).unwrap_err().is_truncation());
    }

    #[test]
    fn reserved_length_marker() {
        assert_eq!(
            decode(&[tag::STRING, 255]),
            Err(DecodingError::ReservedLengthMarker { offset: 1 })
        );
    }

    #[test]
    fn odd_key_is_malformed() {
        match decode(&[tag::KEY, 1, b'a', tag::INT, 4, 0, 0, 0, 0]) {
            Err(DecodingError::MalformedWstring { offset: 0, .. }) => {}
            other => panic!("expected malformed key, got {:?}", other),
        }
    }

    #[test]
    fn depth_limit() {
        let mut v = Value::Int(0);
        for _ in 0..10 {
            v = Value::Array(vec![v]);
        }
        let enc = encode_full(&v).unwrap();
        assert_eq!(
            decode_with(&enc, &DecodeOptions::default().with_max_depth(5)),
            Err(DecodingError::DepthLimitExceeded { limit: 5 })
        );
        assert_eq!(
            decode_with(&enc, &DecodeOptions::default().with_max_depth(10)).unwrap(),
            v
        );
    }

    #[test]
    fn key_without_value_is_dropped() {
        let mut enc = encode_full(&obj(vec![("a", Value::Int(1))])).unwrap();
        enc.extend(&[tag::KEY, 2, b'b', 0]);
        assert_eq!(decode(&enc).unwrap(), obj(vec![("a", Value::Int(1))]));
    }

    #[test]
    fn bare_value_inside_object_is_dropped() {
        let mut body = Vec::new();
        encode_block(&Value::Int(9), &mut body).unwrap();
        body.extend(encode_full(&obj(vec![("k", Value::Int(1))])).unwrap());
        let mut enc = vec![tag::JSONOBJECT, body.len() as u8];
        enc.extend(body);
        assert_eq!(decode(&enc).unwrap(), obj(vec![("k", Value::Int(1))]));
    }
}

//! Format sniffing.
//!
//! Nothing in either format announces which one a buffer holds, so [`decode`] tries the
//! stricter one first: a buffer is a feature stream if it frames cleanly as AWG and holds
//! a FILE or FEATURE block, and an object graph otherwise.

use crate::{
    awb,
    awg::{self, FeatureRecord},
    encoding::Result,
    errors::DecodingError,
    options::DecodeOptions,
    Value,
};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
/// Whatever a buffer turned out to hold.
pub enum Document {
    /// An AWG feature stream.
    Features(FeatureRecord),
    /// An AWB value.
    Value(Value),
}

impl Document {
    /// The feature record, if this is one.
    pub fn features(&self) -> Option<&FeatureRecord> {
        match self {
            Document::Features(r) => Some(r),
            Document::Value(_) => None,
        }
    }

    /// The value, if this is one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Document::Value(v) => Some(v),
            Document::Features(_) => None,
        }
    }
}

/// Decodes a buffer of either format with the default [`DecodeOptions`].
///
/// # Example
///
/// ```
/// use awcodec::{decode, errors::DecodingError};
///
/// match decode(&[0xff, 0xff]) {
///     Err(DecodingError::Unrecognized { .. }) => {}
///     other => panic!("{:?}", other),
/// }
/// ```
pub fn decode(data: &[u8]) -> Result<Document> { decode_with(data, &DecodeOptions::default()) }

/// Decodes a buffer of either format.
///
/// When neither decoder accepts the buffer the error carries both reasons.
///
/// # Arguments
///
/// * `data: &[u8]` - The whole buffer.
/// * `opts: &DecodeOptions` - Limits for this call, handed to both decoders.
pub fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Document> {
    let awg_err = match awg::decode_with(data, opts) {
        Ok(record) => return Ok(Document::Features(record)),
        Err(e) => e,
    };
    debug!(reason = %awg_err, "not a feature stream, trying AWB");

    match awb::decode_with(data, opts) {
        Ok(v) => Ok(Document::Value(v)),
        Err(awb_err) => {
            Err(DecodingError::Unrecognized {
                awg: Box::new(awg_err),
                awb: Box::new(awb_err),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awg::{geometry::Geometry, Feature};

    #[test]
    fn feature_streams_win() {
        let record = FeatureRecord {
            title: "x".to_string(),
            features: vec![Feature::with_geometry(Geometry::point(1.0, 2.0))],
            ..FeatureRecord::default()
        };
        let data = awg::encode_full(&record).unwrap();
        assert_eq!(decode(&data).unwrap(), Document::Features(record));
    }

    #[test]
    fn object_graphs_fall_back() {
        let v = Value::Object(vec![("k".to_string(), Value::from("v"))].into());
        let data = awb::encode_full(&v).unwrap();
        let doc = decode(&data).unwrap();
        assert_eq!(doc.value(), Some(&v));
        assert_eq!(doc.features(), None);
    }

    #[test]
    fn empty_buffer_is_an_empty_object() {
        assert_eq!(
            decode(&[]).unwrap(),
            Document::Value(Value::Object(Default::default()))
        );
    }

    #[test]
    fn both_reasons_are_kept() {
        match decode(&[0xff, 0xff]) {
            Err(DecodingError::Unrecognized { awg, awb }) => {
                assert!(awg.is_truncation());
                assert_eq!(*awb, DecodingError::ReservedLengthMarker { offset: 1 });
            }
            other => panic!("expected unrecognized, got {:?}", other),
        }
    }
}

pub use crate::{
    awb,
    awg::{
        self,
        geometry::{Coord, CoordTree, Geometry, GeometryKind},
        mark::Mark,
        properties::{NodeRef, Properties, PropertySchema, SharedProperties},
        EntityRef, Feature, FeatureRecord,
    },
    document::{decode, decode_with, Document},
    encoding::{Color, Cursor, Serializer},
    errors::{DecodingError, EncodingError},
    options::DecodeOptions,
    vecmap::VecMap,
    Value,
};
pub use std::convert::TryFrom;

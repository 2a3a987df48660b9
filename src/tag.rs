//! The tag byte table shared by both formats.
//!
//! AWB and AWG draw their tags from the same byte space but frame their blocks
//! differently: AWB follows a tag with a [length prefix](crate::encoding::length),
//! AWG with a fixed 4-byte signed length.

/// File header of a feature stream.
pub const FILE: u8 = 1;
/// One feature of a feature stream.
pub const FEATURE: u8 = 2;
/// Layer record.
pub const LAYER: u8 = 3;
/// Sublayer record.
pub const SUBLAYER: u8 = 4;
/// Node type record.
pub const NODE_TYPE: u8 = 5;
/// Feature geometry.
pub const COORD: u8 = 11;
/// Feature attributes.
pub const PROPERTIES: u8 = 12;
/// Container of annotation marks.
pub const MARKS: u8 = 13;
/// A single annotation mark.
pub const MARK: u8 = 14;
/// Source node references.
pub const SOURCE_NODE: u8 = 15;
/// Symbol record.
pub const SYMBOL: u8 = 16;

/// Object key, always followed by the value it names.
pub const KEY: u8 = 80;
/// Wide string value.
pub const STRING: u8 = 81;
/// Boolean value, one byte.
pub const BOOLEAN: u8 = 82;
/// 32-bit integer value.
pub const INT: u8 = 83;
/// 32-bit float value.
pub const FLOAT: u8 = 84;
/// Nested object.
pub const JSONOBJECT: u8 = 85;
/// Nested array.
pub const JSONARRAY: u8 = 86;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Semantic kind of a tag byte.
pub enum TypeTag {
    /// [`FILE`]
    File,
    /// [`FEATURE`]
    Feature,
    /// [`LAYER`]
    Layer,
    /// [`SUBLAYER`]
    Sublayer,
    /// [`NODE_TYPE`]
    NodeType,
    /// [`COORD`]
    Coord,
    /// [`PROPERTIES`]
    Properties,
    /// [`MARKS`]
    Marks,
    /// [`MARK`]
    Mark,
    /// [`SOURCE_NODE`]
    SourceNode,
    /// [`SYMBOL`]
    Symbol,
    /// [`KEY`]
    Key,
    /// [`STRING`]
    Str,
    /// [`BOOLEAN`]
    Boolean,
    /// [`INT`]
    Int,
    /// [`FLOAT`]
    Float,
    /// [`JSONOBJECT`]
    Object,
    /// [`JSONARRAY`]
    Array,
}

use TypeTag::*;

impl TypeTag {
    /// Looks up a tag byte, returning `None` for bytes outside the table.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::tag::{self, TypeTag};
    ///
    /// assert_eq!(TypeTag::from_byte(tag::COORD), Some(TypeTag::Coord));
    /// assert_eq!(TypeTag::from_byte(0), None);
    /// ```
    pub fn from_byte(byte: u8) -> Option<TypeTag> {
        match byte {
            FILE => Some(File),
            FEATURE => Some(Feature),
            LAYER => Some(Layer),
            SUBLAYER => Some(Sublayer),
            NODE_TYPE => Some(NodeType),
            COORD => Some(Coord),
            PROPERTIES => Some(Properties),
            MARKS => Some(Marks),
            MARK => Some(Mark),
            SOURCE_NODE => Some(SourceNode),
            SYMBOL => Some(Symbol),
            KEY => Some(Key),
            STRING => Some(Str),
            BOOLEAN => Some(Boolean),
            INT => Some(Int),
            FLOAT => Some(Float),
            JSONOBJECT => Some(Object),
            JSONARRAY => Some(Array),
            _ => None,
        }
    }

    /// The byte this tag is written as.
    pub fn byte(self) -> u8 {
        match self {
            File => FILE,
            Feature => FEATURE,
            Layer => LAYER,
            Sublayer => SUBLAYER,
            NodeType => NODE_TYPE,
            Coord => COORD,
            Properties => PROPERTIES,
            Marks => MARKS,
            Mark => MARK,
            SourceNode => SOURCE_NODE,
            Symbol => SYMBOL,
            Key => KEY,
            Str => STRING,
            Boolean => BOOLEAN,
            Int => INT,
            Float => FLOAT,
            Object => JSONOBJECT,
            Array => JSONARRAY,
        }
    }

    /// Whether the tag belongs to the object-graph (AWB) family.
    pub fn is_value(self) -> bool {
        match self {
            Key | Str | Boolean | Int | Float | Object | Array => true,
            _ => false,
        }
    }
}

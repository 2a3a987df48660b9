//! # awcodec
//!
//! Compact binary encodings for map features and the attributes that travel with them.
//! Two formats share one primitive layer:
//!
//! * **AWB**, a generic graph of typed objects, arrays and scalars ([`awb`]);
//! * **AWG**, a stream of geographic features with geometry, properties, annotation
//!   marks and source node references ([`awg`]);
//! * **Blob**, the little-endian scalars, length prefixes and wide strings both are
//!   built from ([`encoding`]).
//!
//! # Usage
//!
//! Most callers have a buffer and do not know which format it holds. [`decode`] tries
//! the feature stream first and falls back to the object graph:
//!
//! ```
//! use awcodec::prelude::*;
//!
//! let mut obj = VecMap::new();
//! obj.insert("name".to_string(), Value::from("substation"));
//! obj.insert("voltage".to_string(), Value::from(110));
//!
//! // encode
//! let encoded = awb::encode_full(&Value::Object(obj.clone())).unwrap();
//!
//! // and then decode, letting the dispatcher figure out the format
//! match decode(&encoded).unwrap() {
//!     Document::Value(v) => assert_eq!(v, Value::Object(obj)),
//!     Document::Features(_) => panic!("not a feature stream"),
//! }
//! ```
//!
//! Decoding is pure: the same buffer always decodes to the same document, nothing is
//! cached, and the result borrows nothing from the input.
//!
//! # Wire format
//!
//! All multi-byte numbers are little-endian and fixed width.
//!
//! ## Length prefix
//!
//! | First byte | Followed by | Value     |
//! | ---        | ---         | ---       |
//! | `0..=252`  | nothing     | the byte  |
//! | `253`      | `u16`       | the `u16` |
//! | `254`      | `u32`       | the `u32` |
//! | `255`      | -           | reserved  |
//!
//! ## Primitives
//!
//! | Field   | Width          | Notes                                          |
//! | ---     | ---            | ---                                            |
//! | Wstring | prefix + `N`   | `N` bytes of UTF-16LE, so `N` is even          |
//! | int32   | 4              |                                                |
//! | float32 | 4              |                                                |
//! | Color   | 4              | `r, g, b, 255 - a`                             |
//!
//! ## AWB
//!
//! A run of `tag, length prefix, payload` blocks.
//!
//! | Tag | Name       | Payload                        |
//! | --- | ---        | ---                            |
//! | 80  | KEY        | UTF-16LE, names the next block |
//! | 81  | STRING     | UTF-16LE                       |
//! | 82  | BOOLEAN    | one byte                       |
//! | 83  | INT        | int32                          |
//! | 84  | FLOAT      | float32                        |
//! | 85  | JSONOBJECT | a run of blocks with keys      |
//! | 86  | JSONARRAY  | a run of blocks without keys   |
//!
//! ## AWG
//!
//! A run of `tag, int32 length, payload` blocks. Note the fixed-width signed length:
//! AWG does not use the length prefix for block headers.
//!
//! | Tag | Name        | Payload                                              |
//! | --- | ---         | ---                                                  |
//! | 1   | FILE        | int32 source, int32 block, int32 entity, Wstring     |
//! | 2   | FEATURE     | a run of the blocks below                            |
//! | 11  | COORD       | kind byte, then a point, a ring or groups of rings   |
//! | 12  | PROPERTIES  | kind byte, fixed fields, optional color Wstring      |
//! | 13  | MARKS       | a run of MARK blocks                                 |
//! | 14  | MARK        | rotation, text height, text, COORD block, color      |
//! | 15  | SOURCE_NODE | u8 count, then `(block, entity)` int32 pairs         |
//!
//! See [`awg::geometry`] for the coordinate kinds and [`awg::properties`] for the two
//! property layouts.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod awb;
pub mod awg;
pub mod document;
pub mod encoding;
pub mod errors;
pub mod options;
pub mod prelude;
pub mod tag;
pub mod vecmap;

pub use document::{decode, decode_with, Document};

use failure::{bail, Error};
use std::convert::TryInto;
use vecmap::VecMap;

#[derive(PartialEq, Clone, Debug)]
/// A decoded AWB value and its variants.
///
/// # Example
///
/// ```
/// use awcodec::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Text, carried as UTF-16 on the wire.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 32-bit float.
    Float(f32),
    /// Keyed values, in the order the keys were written.
    ///
    /// ```
    /// use awcodec::prelude::*;
    ///
    /// let vmap: VecMap<String, Value> = vec![("hello".to_string(), Value::from(1))]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let obj = Value::Object(vmap);
    /// ```
    Object(VecMap<String, Value>),
    /// Un-keyed values.
    ///
    /// ```
    /// use awcodec::prelude::*;
    ///
    /// let arr = Value::from(vec![1, 2, 3]);
    /// ```
    Array(Vec<Value>),
}

impl Value {
    /// Converts a [`Value`] to a slice of [`Value`].
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::prelude::*;
    ///
    /// let v = Value::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(v.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Value>, Error> {
        match self {
            Value::Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Consumes a [`Value`], converting it into a vector of [`Value`]s.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    pub fn into_vec(self) -> Result<Vec<Value>, Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not an `Array`"),
        }
    }

    /// Converts a [`Value`] to a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Object`].
    pub fn to_object(&self) -> Result<&VecMap<String, Value>, Error> {
        match self {
            Value::Object(m) => Ok(m),
            _ => bail!("This value is not an `Object`"),
        }
    }

    /// Consumes a [`Value`], converting it into a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Object`].
    pub fn into_object(self) -> Result<VecMap<String, Value>, Error> {
        match self.try_into() {
            Ok(m) => Ok(m),
            Err(_e) => bail!("This value is not an `Object`"),
        }
    }

    /// Looks up a key of an object. `None` for missing keys and for non-objects.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::prelude::*;
    ///
    /// let mut m = VecMap::new();
    /// m.insert("blockId".to_string(), Value::from(3));
    /// let v = Value::Object(m);
    ///
    /// assert_eq!(v.get("blockId"), Some(&Value::Int(3)));
    /// assert_eq!(v.get("entityId"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(m) => m.get(key),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::Int`].
    pub fn to_int(&self) -> Result<i32, Error> {
        match self {
            Value::Int(i) => Ok(*i),
            _ => bail!("Value is not `Int`"),
        }
    }

    /// Returns the float, if this is a [`Value::Float`].
    pub fn to_float(&self) -> Result<f32, Error> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => bail!("Value is not `Float`"),
        }
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Returns the text, if this is a [`Value::Str`].
    pub fn to_str(&self) -> Result<&str, Error> {
        match self {
            Value::Str(s) => Ok(s),
            _ => bail!("Value is not a string"),
        }
    }

    /// Whether this is a container.
    pub fn is_container(&self) -> bool {
        match self {
            Value::Object(_) | Value::Array(_) => true,
            _ => false,
        }
    }
}

fn fmt_str(s: &str) -> String { format!("{:?}", s) }

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_object(m: &VecMap<String, Value>, indent: usize) -> String {
            let mut obj_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    obj_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    obj_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                let value = fmt_helper(v, indent + 2);
                obj_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_str(k),
                    value = value,
                ));

                // check if we're at last element
                if i == m.len() - 1 {
                    obj_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            obj_string.push('}');

            obj_string
        }

        fn fmt_helper(v: &Value, indent: usize) -> String {
            match v {
                Value::Str(s) => fmt_str(s),
                Value::Bool(b) => b.to_string(),
                Value::Int(i) => i.to_string(),
                Value::Float(x) => format!("{:?}", x),
                Value::Array(a) => {
                    let items: Vec<String> = a.iter().map(|v| fmt_helper(v, indent)).collect();
                    format!("[{}]", items.join(", "))
                }
                Value::Object(m) => fmt_object(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Value::Array(v.into_iter().map(T::into).collect()) }
}

from_fn!(Value, String, Value::Str);
from_fn!(Value, bool, Value::Bool);
from_fn!(Value, i32, Value::Int);
from_fn!(Value, f32, Value::Float);
from_fn!(Value, VecMap<String, Value>, Value::Object);

from_as!(Value, i8, i32);
from_as!(Value, i16, i32);
from_as!(Value, u8, i32);
from_as!(Value, u16, i32);

compose_from!(Value, String, &str);

try_from_ctor!(Value, String, Value::Str);
try_from_ctor!(Value, bool, Value::Bool);
try_from_ctor!(Value, i32, Value::Int);
try_from_ctor!(Value, f32, Value::Float);
try_from_ctor!(Value, Vec<Value>, Value::Array);
try_from_ctor!(Value, VecMap<String, Value>, Value::Object);

use super::builder::format_path;
use super::error::BencodeError;
use super::source::Destination;
use super::value::Value;

/// A way of rendering a value tree into a destination.
///
/// [`BencodeFormat`] produces the canonical wire encoding;
/// [`JsonFormat`](crate::JsonFormat) produces a readable projection.
pub trait Format {
    fn encode(&self, value: &Value, dest: &mut dyn Destination) -> Result<(), BencodeError>;
}

/// The canonical bencode encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BencodeFormat;

impl Format for BencodeFormat {
    fn encode(&self, value: &Value, dest: &mut dyn Destination) -> Result<(), BencodeError> {
        ensure_assigned(value)?;
        encode_value(value, dest)
    }
}

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// # Errors
///
/// Returns [`BencodeError::UnassignedPlaceholder`] if the tree still
/// contains a [`Value::Hole`].
///
/// # Examples
///
/// ```
/// use rbit_bencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// // Encode an integer
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a string
/// let encoded = encode(&Value::string("hello")).unwrap();
/// assert_eq!(encoded, b"5:hello");
///
/// // Encode a list
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// let encoded = encode(&list).unwrap();
/// assert_eq!(encoded, b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// let encoded = encode(&Value::Dict(dict)).unwrap();
/// assert_eq!(encoded, b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    BencodeFormat.encode(value, &mut buf)?;
    Ok(buf)
}

// Checked up front so a destination never receives a partial encoding.
fn ensure_assigned(value: &Value) -> Result<(), BencodeError> {
    match value.find_hole() {
        Some(path) => Err(BencodeError::UnassignedPlaceholder(format_path(&path))),
        None => Ok(()),
    }
}

fn encode_value(value: &Value, dest: &mut dyn Destination) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => {
            dest.add_byte(b'i')?;
            dest.add(i.to_string().as_bytes())?;
            dest.add_byte(b'e')?;
        }
        Value::Bytes(b) => encode_bytes(b, dest)?,
        Value::List(l) => {
            dest.add_byte(b'l')?;
            for item in l {
                encode_value(item, dest)?;
            }
            dest.add_byte(b'e')?;
        }
        Value::Dict(d) => {
            dest.add_byte(b'd')?;
            for (key, val) in d {
                encode_bytes(key, dest)?;
                encode_value(val, dest)?;
            }
            dest.add_byte(b'e')?;
        }
        // ensure_assigned rejects holes before the walk starts.
        Value::Hole => unreachable!("hole reached the encoder"),
    }
    Ok(())
}

fn encode_bytes(bytes: &[u8], dest: &mut dyn Destination) -> Result<(), BencodeError> {
    dest.add(bytes.len().to_string().as_bytes())?;
    dest.add_byte(b':')?;
    dest.add(bytes)
}

use bytes::Bytes;
use std::collections::BTreeMap;

use crate::error::{BencodeError, Kind};

/// A bencode value.
///
/// Bencode has four data types: integers, byte strings, lists, and dictionaries.
/// This enum represents any bencode value and provides methods for type-safe access.
/// Dictionaries are kept in a [`BTreeMap`], so their keys are always sorted
/// byte-wise and unique no matter how the tree was built.
///
/// [`Value::Hole`] marks a slot created by the builder methods that has not
/// been assigned yet. A decoded tree never contains one, and encoding a tree
/// that still does fails.
///
/// # Examples
///
/// ```
/// use rbit_bencode::Value;
///
/// // Creating values directly
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::list([1, 2, 3]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
///
/// // Accessing values
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, sorted by key.
    Dict(BTreeMap<Bytes, Value>),
    /// A slot that has not been assigned yet.
    #[default]
    Hole,
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbit_bencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Builds a list from anything convertible into values.
    ///
    /// Elements may themselves be lists or dictionaries, so nested literals
    /// can be written inline.
    ///
    /// ```
    /// use rbit_bencode::{encode, Value};
    ///
    /// let value = Value::list([Value::from(1), Value::list(["a", "b"])]);
    /// assert_eq!(encode(&value).unwrap(), b"li1el1:a1:bee");
    /// ```
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a dictionary from key/value pairs. Later duplicates win.
    ///
    /// ```
    /// use rbit_bencode::{encode, Value};
    ///
    /// let value = Value::dict([("spam", Value::from("eggs")), ("cow", Value::from("moo"))]);
    /// assert_eq!(encode(&value).unwrap(), b"d3:cow3:moo4:spam4:eggse");
    /// ```
    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: Into<Value>,
    {
        Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (Bytes::copy_from_slice(k.as_ref()), v.into()))
                .collect(),
        )
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Dict(_) => Kind::Dict,
            Value::Hole => Kind::Hole,
        }
    }

    /// Returns `true` if this is an unassigned placeholder.
    pub fn is_hole(&self) -> bool {
        matches!(self, Value::Hole)
    }

    /// Returns the value as an integer, if it is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbit_bencode::Value;
    ///
    /// let int = Value::Integer(42);
    /// assert_eq!(int.as_integer(), Some(42));
    ///
    /// let string = Value::string("hello");
    /// assert_eq!(string.as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbit_bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// let dict = value.as_dict().unwrap();
    /// assert!(dict.contains_key(b"foo".as_slice()));
    /// ```
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the integer or a type-mismatch error naming the actual kind.
    ///
    /// ```
    /// use rbit_bencode::{BencodeError, Kind, Value};
    ///
    /// assert_eq!(Value::Integer(7).try_integer().unwrap(), 7);
    /// let err = Value::string("7").try_integer().unwrap_err();
    /// assert!(matches!(
    ///     err,
    ///     BencodeError::TypeMismatch { expected: Kind::Integer, found: Kind::Bytes }
    /// ));
    /// ```
    pub fn try_integer(&self) -> Result<i64, BencodeError> {
        self.as_integer().ok_or_else(|| self.mismatch(Kind::Integer))
    }

    pub fn try_integer_mut(&mut self) -> Result<&mut i64, BencodeError> {
        match self {
            Value::Integer(i) => Ok(i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }

    pub fn try_bytes(&self) -> Result<&Bytes, BencodeError> {
        self.as_bytes().ok_or_else(|| self.mismatch(Kind::Bytes))
    }

    pub fn try_bytes_mut(&mut self) -> Result<&mut Bytes, BencodeError> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.mismatch(Kind::Bytes)),
        }
    }

    pub fn try_list(&self) -> Result<&Vec<Value>, BencodeError> {
        self.as_list().ok_or_else(|| self.mismatch(Kind::List))
    }

    pub fn try_list_mut(&mut self) -> Result<&mut Vec<Value>, BencodeError> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(other.mismatch(Kind::List)),
        }
    }

    pub fn try_dict(&self) -> Result<&BTreeMap<Bytes, Value>, BencodeError> {
        self.as_dict().ok_or_else(|| self.mismatch(Kind::Dict))
    }

    pub fn try_dict_mut(&mut self) -> Result<&mut BTreeMap<Bytes, Value>, BencodeError> {
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(other.mismatch(Kind::Dict)),
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbit_bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Looks up an element in this value if it is a list.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_list()?.get(index)
    }

    pub(crate) fn mismatch(&self, expected: Kind) -> BencodeError {
        BencodeError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

macro_rules! from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(i64::from(i))
                }
            }
        )*
    };
}

from_lossless_int!(i8, i16, i32, u8, u16, u32);

impl TryFrom<u64> for Value {
    type Error = BencodeError;

    fn try_from(i: u64) -> Result<Self, Self::Error> {
        i64::try_from(i)
            .map(Value::Integer)
            .map_err(|_| BencodeError::OutOfRange(i))
    }
}

impl TryFrom<usize> for Value {
    type Error = BencodeError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        Value::try_from(i as u64)
    }
}

/// Truncates toward zero; values beyond the `i64` range saturate and NaN becomes 0.
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Integer(f as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Integer(f as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Integer(i64::from(b))
    }
}

/// Null maps to the integer 0.
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Integer(0)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: AsRef<[u8]>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::dict(iter)
    }
}

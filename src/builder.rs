//! Programmatic construction of value trees.
//!
//! These methods replace implicit mutation-on-index with explicit calls:
//! [`Value::entry`] and [`Value::element`] create whatever is missing on the
//! way down, turning a [`Value::Hole`] into a dictionary or list as needed and
//! leaving fresh slots as holes until they are assigned.
//!
//! ```
//! use rbit_bencode::{encode, Value};
//!
//! let mut root = Value::Hole;
//! root.set_key("pi", 3.7)?;
//! root.set_key("list", Value::list([1, 0, 2]))?;
//! assert_eq!(encode(&root)?, b"d4:listli1ei0ei2ee2:pii3ee");
//! # Ok::<(), rbit_bencode::BencodeError>(())
//! ```

use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{BencodeError, Kind};
use crate::value::Value;

/// One step of a path into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(Bytes),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(Bytes::copy_from_slice(key.as_bytes()))
    }
}

impl From<&[u8]> for PathSegment {
    fn from(key: &[u8]) -> Self {
        PathSegment::Key(Bytes::copy_from_slice(key))
    }
}

impl From<Bytes> for PathSegment {
    fn from(key: Bytes) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "[{:?}]", String::from_utf8_lossy(key)),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Renders a path as `root["key"][3]`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("root");
    for segment in path {
        out.push_str(&segment.to_string());
    }
    out
}

impl Value {
    /// Returns the value stored under `key`, inserting a hole if it is missing.
    ///
    /// A hole becomes an empty dictionary first. Any other non-dictionary is
    /// a [`BencodeError::TypeMismatch`].
    pub fn entry(&mut self, key: impl AsRef<[u8]>) -> Result<&mut Value, BencodeError> {
        if self.is_hole() {
            *self = Value::Dict(BTreeMap::new());
        }
        match self {
            Value::Dict(d) => Ok(d
                .entry(Bytes::copy_from_slice(key.as_ref()))
                .or_insert(Value::Hole)),
            other => Err(other.mismatch(Kind::Dict)),
        }
    }

    /// Returns the list element at `index`, growing the list with holes so
    /// that the index exists.
    ///
    /// A hole becomes an empty list first. Any other non-list is a
    /// [`BencodeError::TypeMismatch`].
    ///
    /// ```
    /// use rbit_bencode::Value;
    ///
    /// let mut list = Value::Hole;
    /// *list.element(2)? = Value::from(7);
    /// assert_eq!(list.as_list().unwrap().len(), 3);
    /// assert!(list.get_index(0).unwrap().is_hole());
    /// # Ok::<(), rbit_bencode::BencodeError>(())
    /// ```
    pub fn element(&mut self, index: usize) -> Result<&mut Value, BencodeError> {
        let len = index
            .checked_add(1)
            .ok_or(BencodeError::IndexOutOfRange(index))?;
        let list = self.ensure_list_len(len)?;
        Ok(&mut list[index])
    }

    /// Makes sure this is a list of at least `len` elements, padding with holes.
    /// Never shrinks.
    ///
    /// A length that cannot be allocated is a [`BencodeError::IndexOutOfRange`].
    pub fn ensure_list_len(&mut self, len: usize) -> Result<&mut Vec<Value>, BencodeError> {
        if self.is_hole() {
            *self = Value::List(Vec::new());
        }
        match self {
            Value::List(l) => {
                if l.len() < len {
                    l.try_reserve(len - l.len())
                        .map_err(|_| BencodeError::IndexOutOfRange(len - 1))?;
                    l.resize_with(len, || Value::Hole);
                }
                Ok(l)
            }
            other => Err(other.mismatch(Kind::List)),
        }
    }

    /// Assigns `value` to `key`, turning a hole into a dictionary first.
    pub fn set_key(
        &mut self,
        key: impl AsRef<[u8]>,
        value: impl Into<Value>,
    ) -> Result<(), BencodeError> {
        *self.entry(key)? = value.into();
        Ok(())
    }

    /// Assigns `value` at `index`, growing the list as needed.
    pub fn set_index(&mut self, index: usize, value: impl Into<Value>) -> Result<(), BencodeError> {
        *self.element(index)? = value.into();
        Ok(())
    }

    /// Walks `path`, creating missing containers, and returns the slot at its end.
    pub fn slot_mut(&mut self, path: &[PathSegment]) -> Result<&mut Value, BencodeError> {
        let mut node = self;
        for segment in path {
            node = match segment {
                PathSegment::Key(key) => node.entry(key)?,
                PathSegment::Index(index) => node.element(*index)?,
            };
        }
        Ok(node)
    }

    /// Assigns `value` at the end of `path`.
    ///
    /// ```
    /// use rbit_bencode::{encode, PathSegment, Value};
    ///
    /// let mut root = Value::Hole;
    /// root.set_path(&["info".into(), "files".into(), PathSegment::Index(0)], "a.txt")?;
    /// assert_eq!(encode(&root)?, b"d4:infod5:filesl5:a.txteee");
    /// # Ok::<(), rbit_bencode::BencodeError>(())
    /// ```
    pub fn set_path(
        &mut self,
        path: &[PathSegment],
        value: impl Into<Value>,
    ) -> Result<(), BencodeError> {
        *self.slot_mut(path)? = value.into();
        Ok(())
    }

    /// Follows `path` without modifying anything.
    pub fn get_path(&self, path: &[PathSegment]) -> Option<&Value> {
        path.iter().try_fold(self, |node, segment| match segment {
            PathSegment::Key(key) => node.get(key),
            PathSegment::Index(index) => node.get_index(*index),
        })
    }

    /// Path of the first unassigned hole in depth-first order, if any.
    pub fn find_hole(&self) -> Option<Vec<PathSegment>> {
        let mut path = Vec::new();
        if find_hole_at(self, &mut path) {
            Some(path)
        } else {
            None
        }
    }
}

fn find_hole_at(value: &Value, path: &mut Vec<PathSegment>) -> bool {
    match value {
        Value::Hole => true,
        Value::Integer(_) | Value::Bytes(_) => false,
        Value::List(l) => {
            for (index, item) in l.iter().enumerate() {
                path.push(PathSegment::Index(index));
                if find_hole_at(item, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        Value::Dict(d) => {
            for (key, item) in d {
                path.push(PathSegment::Key(key.clone()));
                if find_hole_at(item, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
    }
}

#[cfg(test)]
mod tests;

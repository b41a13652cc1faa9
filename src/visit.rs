//! Depth-first traversal over a value tree.
//!
//! Implement [`Visitor`] (or [`VisitorMut`]) and override only the hooks you
//! need; [`walk`] calls the generic hook for every node and then the hook for
//! the node's kind, before descending into children.

use bytes::Bytes;
use std::collections::BTreeMap;

use crate::value::Value;

pub trait Visitor {
    /// Called for every node, holes included. The root is at depth 1.
    fn visit_value(&mut self, _value: &Value, _depth: usize) {}

    fn visit_integer(&mut self, _value: i64) {}

    fn visit_bytes(&mut self, _value: &Bytes) {}

    fn visit_list(&mut self, _list: &[Value]) {}

    fn visit_dict(&mut self, _dict: &BTreeMap<Bytes, Value>) {}

    /// Called for each dictionary key, before its value is walked.
    fn visit_key(&mut self, _key: &Bytes) {}
}

pub trait VisitorMut {
    fn visit_value(&mut self, _value: &mut Value, _depth: usize) {}

    fn visit_integer(&mut self, _value: &mut i64) {}

    fn visit_bytes(&mut self, _value: &mut Bytes) {}

    fn visit_list(&mut self, _list: &mut Vec<Value>) {}

    fn visit_dict(&mut self, _dict: &mut BTreeMap<Bytes, Value>) {}
}

pub fn walk<V: Visitor + ?Sized>(value: &Value, visitor: &mut V) {
    walk_at(value, visitor, 1);
}

fn walk_at<V: Visitor + ?Sized>(value: &Value, visitor: &mut V, depth: usize) {
    visitor.visit_value(value, depth);
    match value {
        Value::Integer(i) => visitor.visit_integer(*i),
        Value::Bytes(b) => visitor.visit_bytes(b),
        Value::List(l) => {
            visitor.visit_list(l);
            for item in l {
                walk_at(item, visitor, depth + 1);
            }
        }
        Value::Dict(d) => {
            visitor.visit_dict(d);
            for (key, item) in d {
                visitor.visit_key(key);
                walk_at(item, visitor, depth + 1);
            }
        }
        Value::Hole => {}
    }
}

/// Like [`walk`], but hooks may rewrite nodes in place.
///
/// Children are walked after the hooks run, so a hook that replaces a node
/// sees its replacement's children visited.
pub fn walk_mut<V: VisitorMut + ?Sized>(value: &mut Value, visitor: &mut V) {
    walk_mut_at(value, visitor, 1);
}

fn walk_mut_at<V: VisitorMut + ?Sized>(value: &mut Value, visitor: &mut V, depth: usize) {
    visitor.visit_value(value, depth);
    match value {
        Value::Integer(i) => visitor.visit_integer(i),
        Value::Bytes(b) => visitor.visit_bytes(b),
        Value::List(l) => {
            visitor.visit_list(l);
            for item in l.iter_mut() {
                walk_mut_at(item, visitor, depth + 1);
            }
        }
        Value::Dict(d) => {
            visitor.visit_dict(d);
            for item in d.values_mut() {
                walk_mut_at(item, visitor, depth + 1);
            }
        }
        Value::Hole => {}
    }
}

/// Node counts and sizes gathered from one traversal.
///
/// ```
/// use rbit_bencode::{decode, Stats};
///
/// let value = decode(b"d4:listli1ei0ei2ee2:pii3ee").unwrap();
/// let stats = Stats::collect(&value);
/// assert_eq!(stats.integers, 4);
/// assert_eq!(stats.max_depth, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub integers: usize,
    pub strings: usize,
    pub lists: usize,
    pub dicts: usize,
    pub holes: usize,
    /// Dictionary keys seen, counted separately from `strings`.
    pub keys: usize,
    /// Total payload bytes of strings and keys.
    pub string_bytes: usize,
    pub max_depth: usize,
}

impl Stats {
    pub fn collect(value: &Value) -> Self {
        let mut stats = Self::default();
        walk(value, &mut stats);
        stats
    }

    pub fn nodes(&self) -> usize {
        self.integers + self.strings + self.lists + self.dicts + self.holes
    }
}

impl Visitor for Stats {
    fn visit_value(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        if value.is_hole() {
            self.holes += 1;
        }
    }

    fn visit_integer(&mut self, _value: i64) {
        self.integers += 1;
    }

    fn visit_bytes(&mut self, value: &Bytes) {
        self.strings += 1;
        self.string_bytes += value.len();
    }

    fn visit_list(&mut self, _list: &[Value]) {
        self.lists += 1;
    }

    fn visit_dict(&mut self, _dict: &BTreeMap<Bytes, Value>) {
        self.dicts += 1;
    }

    fn visit_key(&mut self, key: &Bytes) {
        self.keys += 1;
        self.string_bytes += key.len();
    }
}

#[cfg(test)]
mod tests;

use super::*;
use crate::decode::decode;
use crate::encode::encode;

#[derive(Default)]
struct KeyCollector {
    keys: Vec<Vec<u8>>,
    depths: Vec<usize>,
}

impl Visitor for KeyCollector {
    fn visit_value(&mut self, _value: &Value, depth: usize) {
        self.depths.push(depth);
    }

    fn visit_key(&mut self, key: &Bytes) {
        self.keys.push(key.to_vec());
    }
}

#[test]
fn test_walk_order_and_depth() {
    let value = decode(b"d1:ali1ee1:bi2ee").unwrap();
    let mut collector = KeyCollector::default();
    walk(&value, &mut collector);

    assert_eq!(collector.keys, vec![b"a".to_vec(), b"b".to_vec()]);
    // dict, list, integer inside list, integer under "b"
    assert_eq!(collector.depths, vec![1, 2, 3, 2]);
}

#[test]
fn test_stats() {
    let value = decode(b"d4:infod4:name4:test6:pieces3:abce4:listl0:i-1eee").unwrap();
    let stats = Stats::collect(&value);

    assert_eq!(stats.dicts, 2);
    assert_eq!(stats.lists, 1);
    assert_eq!(stats.integers, 1);
    assert_eq!(stats.strings, 3);
    assert_eq!(stats.keys, 4);
    // keys: info, name, pieces, list; strings: test, abc, ""
    assert_eq!(stats.string_bytes, 4 + 4 + 6 + 4 + 4 + 3);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.nodes(), 7);
    assert_eq!(stats.holes, 0);
}

#[test]
fn test_stats_counts_holes() {
    let mut value = Value::Hole;
    value.set_index(2, 1).unwrap();
    let stats = Stats::collect(&value);
    assert_eq!(stats.holes, 2);
    assert_eq!(stats.integers, 1);
}

struct Negate;

impl VisitorMut for Negate {
    fn visit_integer(&mut self, value: &mut i64) {
        *value = -*value;
    }
}

struct FillHoles;

impl VisitorMut for FillHoles {
    fn visit_value(&mut self, value: &mut Value, _depth: usize) {
        if value.is_hole() {
            *value = Value::Integer(0);
        }
    }
}

#[test]
fn test_walk_mut_rewrites_in_place() {
    let mut value = decode(b"d1:ali1ei-2ee1:bi3ee").unwrap();
    walk_mut(&mut value, &mut Negate);
    assert_eq!(encode(&value).unwrap(), b"d1:ali-1ei2ee1:bi-3ee");
}

#[test]
fn test_walk_mut_fills_holes() {
    let mut value = Value::Hole;
    value.set_index(2, 7).unwrap();
    walk_mut(&mut value, &mut FillHoles);
    assert_eq!(encode(&value).unwrap(), b"li0ei0ei7ee");
}

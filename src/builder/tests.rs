use super::*;
use crate::encode::encode;

#[test]
fn test_entry_vivifies_hole_into_dict() {
    let mut root = Value::Hole;
    let slot = root.entry("name").unwrap();
    assert!(slot.is_hole());
    *slot = Value::from("rbit");

    assert_eq!(root.get(b"name").and_then(Value::as_str), Some("rbit"));
    assert_eq!(root.kind(), Kind::Dict);
}

#[test]
fn test_entry_returns_existing_value() {
    let mut root = Value::dict([("a", Value::from(1))]);
    assert_eq!(root.entry("a").unwrap(), &mut Value::Integer(1));
    assert_eq!(root.as_dict().unwrap().len(), 1);
}

#[test]
fn test_entry_on_wrong_kind() {
    let mut root = Value::list([1]);
    assert!(matches!(
        root.entry("a"),
        Err(BencodeError::TypeMismatch {
            expected: Kind::Dict,
            found: Kind::List
        })
    ));

    let mut int = Value::Integer(3);
    assert!(matches!(
        int.element(0),
        Err(BencodeError::TypeMismatch {
            expected: Kind::List,
            found: Kind::Integer
        })
    ));
}

#[test]
fn test_keys_stay_sorted_on_insert() {
    let mut root = Value::Hole;
    for key in ["two", "three", "one", "two"] {
        root.set_key(key, key.len() as i64).unwrap();
    }
    let keys: Vec<&[u8]> = root
        .as_dict()
        .unwrap()
        .keys()
        .map(|k| k.as_ref())
        .collect();
    assert_eq!(keys, vec![&b"one"[..], &b"three"[..], &b"two"[..]]);
}

#[test]
fn test_sparse_list_assignment() {
    let mut root = Value::Hole;
    root.set_index(5, "five").unwrap();
    root.set_index(3, "three").unwrap();

    let list = root.as_list().unwrap();
    assert_eq!(list.len(), 6);
    assert!(list[0].is_hole());
    assert_eq!(list[3].as_str(), Some("three"));
    assert_eq!(list[5].as_str(), Some("five"));
}

#[test]
fn test_element_rejects_unrepresentable_index() {
    let mut root = Value::Hole;
    assert!(matches!(
        root.element(usize::MAX),
        Err(BencodeError::IndexOutOfRange(usize::MAX))
    ));

    let mut list = Value::list([1]);
    assert!(matches!(
        list.set_index(usize::MAX / 2, 0),
        Err(BencodeError::IndexOutOfRange(_))
    ));
    assert_eq!(list.as_list().unwrap().len(), 1);
}

#[test]
fn test_encode_rejects_unassigned_slots() {
    let mut root = Value::Hole;
    root.entry("list").unwrap().set_index(2, 9).unwrap();

    match encode(&root) {
        Err(BencodeError::UnassignedPlaceholder(path)) => {
            assert_eq!(path, "root[\"list\"][0]")
        }
        other => panic!("expected placeholder error, got {:?}", other),
    }

    for i in 0..2 {
        root.entry("list").unwrap().set_index(i, i as i64).unwrap();
    }
    assert_eq!(encode(&root).unwrap(), b"d4:listli0ei1ei9eee");
}

#[test]
fn test_encode_bare_hole() {
    match encode(&Value::Hole) {
        Err(BencodeError::UnassignedPlaceholder(path)) => assert_eq!(path, "root"),
        other => panic!("expected placeholder error, got {:?}", other),
    }
}

#[test]
fn test_ensure_list_len_never_shrinks() {
    let mut list = Value::list([1, 2, 3]);
    assert_eq!(list.ensure_list_len(1).unwrap().len(), 3);
    assert_eq!(list.ensure_list_len(5).unwrap().len(), 5);
}

#[test]
fn test_set_and_get_path() {
    let path: Vec<PathSegment> = vec![
        "info".into(),
        "files".into(),
        1usize.into(),
        "length".into(),
    ];
    let mut root = Value::Hole;
    root.set_path(&path, 1024).unwrap();

    assert_eq!(root.get_path(&path), Some(&Value::Integer(1024)));
    assert!(root
        .get_path(&["info".into(), "files".into(), 0usize.into()])
        .unwrap()
        .is_hole());
    assert_eq!(root.get_path(&["missing".into()]), None);
    assert_eq!(root.get_path(&[]), Some(&root));
}

#[test]
fn test_set_path_through_scalar_fails() {
    let mut root = Value::dict([("n", Value::from(1))]);
    let err = root
        .set_path(&["n".into(), "deeper".into()], 2)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch: expected dictionary, found integer"
    );
}

#[test]
fn test_format_path() {
    let path = vec![PathSegment::from("a\"b"), PathSegment::Index(4)];
    assert_eq!(format_path(&path), "root[\"a\\\"b\"][4]");
    assert_eq!(format_path(&[]), "root");
}

// SPDX-License-Identifier: Apache-2.0

// API tests for parsing, accessors and release

use ezjson::{parse, parse_str, parse_with_options, Kind, ParseOptions, Value};

#[test]
fn test_empty_containers_have_no_children() {
    let object = parse(b"{}").unwrap();
    assert_eq!(object.kind(), Kind::Object);
    assert!(object.is_empty());
    assert_eq!(object.as_object(), Some(&[][..]));

    let array = parse(b"[]").unwrap();
    assert_eq!(array.kind(), Kind::Array);
    assert!(array.is_empty());
    assert_eq!(array.as_array(), Some(&[][..]));
}

#[test]
fn test_simple_object() {
    let json = r#"{"name": "value", "count": 42, "ratio": 0.25, "on": true, "off": false, "nothing": null}"#;
    let doc = parse_str(json).unwrap();

    assert_eq!(doc.len(), 6);
    assert_eq!(doc.get("name").and_then(Value::as_str), Some("value"));
    assert_eq!(doc.get("count").and_then(Value::as_i64), Some(42));
    assert_eq!(doc.get("ratio").and_then(Value::as_f64), Some(0.25));
    assert_eq!(doc.get("on").and_then(Value::as_bool), Some(true));
    assert_eq!(doc.get("off").and_then(Value::as_bool), Some(false));
    assert!(doc.get("nothing").is_some_and(Value::is_null));
    assert_eq!(doc.get("missing"), None);
}

#[test]
fn test_members_keep_document_order() {
    let doc = parse_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<&str> = doc
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_duplicate_keys_first_match_and_release() {
    let doc = parse_str(r#"{"x":1,"x":2}"#).unwrap();
    assert_eq!(doc.get("x"), Some(&Value::Int(1)));
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.as_object().unwrap()[1].1, Value::Int(2));
    // The object and both members.
    assert_eq!(doc.release(), 3);
}

#[test]
fn test_case_insensitive_lookup() {
    let doc = parse_str(r#"{"Content-Type": "json", "content-type": "text"}"#).unwrap();
    assert_eq!(
        doc.get_ignore_ascii_case("CONTENT-TYPE").and_then(Value::as_str),
        Some("json")
    );
    assert_eq!(doc.get("content-type").and_then(Value::as_str), Some("text"));
}

#[test]
fn test_nested_structures() {
    let json = r#"
    {
        "users": [
            {"id": 1, "tags": ["a", "b"]},
            {"id": 2, "tags": []}
        ],
        "meta": {"total": 2}
    }"#;
    let doc = parse_str(json).unwrap();
    let users = doc.get("users").unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(
        users.at(0).and_then(|u| u.get("tags")).and_then(|t| t.at(1)),
        Some(&Value::String("b".into()))
    );
    assert!(users.at(1).and_then(|u| u.get("tags")).unwrap().is_empty());
    assert_eq!(
        doc.get("meta").and_then(|m| m.get("total")),
        Some(&Value::Int(2))
    );
    // root, users, 2 user objects, 2 ids, 2 tag arrays, 2 tags, meta, total
    assert_eq!(doc.release(), 12);
}

#[test]
fn test_whitespace_everywhere() {
    let json = " \t\r\n[ 1 ,\n\t2 , { \"k\" : [ ] } ]\n ";
    let doc = parse_str(json).unwrap();
    assert_eq!(doc.len(), 3);
    assert_eq!(doc.at(1), Some(&Value::Int(2)));
    assert_eq!(doc.at(2).and_then(|o| o.get("k")), Some(&Value::Array(vec![])));
}

#[test]
fn test_long_whitespace_runs() {
    let padding = " ".repeat(100) + &"\t\n".repeat(40);
    let json = format!("{padding}{{{padding}\"a\"{padding}:{padding}1{padding}}}{padding}");
    let doc = parse_str(&json).unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Int(1)));
}

#[test]
fn test_numbers_as_strings_keeps_literal_text() {
    let options = ParseOptions::new().numbers_as_strings(true);
    let json = br#"{"big": 123456789012345678901234567890, "float": 1.10, "hex": 0x1F, "neg": -0}"#;
    let doc = parse_with_options(json, options).unwrap();
    assert_eq!(
        doc.get("big").and_then(Value::as_strnum),
        Some("123456789012345678901234567890")
    );
    assert_eq!(doc.get("float").and_then(Value::as_strnum), Some("1.10"));
    assert_eq!(doc.get("hex").and_then(Value::as_strnum), Some("0x1F"));
    assert_eq!(doc.get("neg").and_then(Value::as_strnum), Some("-0"));
    assert!(doc.get("big").unwrap().is_number());
}

#[test]
fn test_strings_with_escapes() {
    let doc = parse_str(r#"["line\nbreak", "tab\there", "quote\"", "slash\/", "été"]"#)
        .unwrap();
    let strings: Vec<&str> = doc
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        strings,
        ["line\nbreak", "tab\there", "quote\"", "slash/", "\u{e9}t\u{e9}"]
    );
}

#[test]
fn test_keys_with_escapes() {
    let doc = parse_str(r#"{"a\"b": 1, "A": 2}"#).unwrap();
    assert_eq!(doc.get("a\"b"), Some(&Value::Int(1)));
    assert_eq!(doc.get("A"), Some(&Value::Int(2)));
}

#[test]
fn test_parse_entry_points_agree() {
    let json = r#"[1, "two", 3.0]"#;
    let a = parse(json.as_bytes()).unwrap();
    let b = parse_str(json).unwrap();
    let c = parse_with_options(json.as_bytes(), ParseOptions::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_length_is_expressed_by_slicing() {
    let buffer = b"[1, 2] trailing bytes the caller excluded";
    let doc = parse(&buffer[..6]).unwrap();
    assert_eq!(doc, Value::Array(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn test_parses_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let good = format!("[{i}]");
                let bad = format!("[{i}, @]");
                (parse_str(&good), parse_str(&bad))
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let (good, bad) = handle.join().unwrap();
        assert_eq!(good, Ok(Value::Array(vec![Value::Int(i as i64)])));
        assert_eq!(bad.unwrap_err().offset(), 4);
    }
}

#[test]
fn test_empty_key_is_kept() {
    let doc = parse_str(r#"{"": 1, "b": {"": null}}"#).unwrap();
    assert_eq!(doc.get(""), Some(&Value::Int(1)));
    assert_eq!(doc.as_object().unwrap()[0].0, "");
    assert!(doc.get("b").and_then(|b| b.get("")).is_some_and(Value::is_null));
    // Selector tokens cannot be empty, so only direct lookup reaches it.
    assert_eq!(ezjson::select(&doc, ".", &[]), None);
}

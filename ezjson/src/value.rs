// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

/// A parsed JSON node.
///
/// Containers own their children in document order. Object members keep
/// duplicate keys; lookups return the first match.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    /// A number kept as its literal text, see
    /// [`ParseOptions::numbers_as_strings`](crate::ParseOptions::numbers_as_strings).
    StrNum(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    Bool(bool),
    Null,
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Float,
    StrNum,
    Array,
    Object,
    Bool,
    Null,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::StrNum(_) => Kind::StrNum,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Bool(_) => Kind::Bool,
            Value::Null => Kind::Null,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Int, Float or StrNum.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::StrNum(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value of a Float, or of an Int converted to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The literal text of a number parsed with numbers kept as strings.
    pub fn as_strnum(&self) -> Option<&str> {
        match self {
            Value::StrNum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Array element at `index`.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    /// First object member named exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// First object member whose name equals `key` ignoring ASCII case.
    pub fn get_ignore_ascii_case(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Number of direct children of an Array or Object, zero otherwise.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frees the tree and returns how many nodes it held, itself included.
    ///
    /// Teardown uses an explicit stack, so arbitrarily deep trees are
    /// released without recursion.
    pub fn release(self) -> usize {
        let mut released = 0;
        let mut pending = Vec::from([self]);
        while let Some(node) = pending.pop() {
            released += 1;
            match node {
                Value::Array(items) => pending.extend(items),
                Value::Object(members) => pending.extend(members.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
        log::trace!("released {released} nodes");
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Value {
        Value::Object(vec![
            ("name".into(), Value::String("ezjson".into())),
            ("Count".into(), Value::Int(3)),
            (
                "list".into(),
                Value::Array(vec![Value::Float(1.5), Value::Null, Value::Bool(true)]),
            ),
            ("count".into(), Value::Int(4)),
        ])
    }

    #[test]
    fn test_kinds_and_predicates() {
        let v = sample();
        assert_eq!(v.kind(), Kind::Object);
        assert!(v.is_object());
        assert!(!v.is_array());

        let list = v.get("list").unwrap();
        assert!(list.is_array());
        assert!(list.at(0).unwrap().is_float());
        assert!(list.at(1).unwrap().is_null());
        assert!(list.at(2).unwrap().is_bool());
        assert!(Value::StrNum("1".into()).is_number());
        assert!(!Value::String("1".into()).is_number());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(0.5).as_i64(), None);
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert_eq!(Value::StrNum("1e999".into()).as_strnum(), Some("1e999"));
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_lookups() {
        let v = sample();
        assert_eq!(v.get("name").and_then(Value::as_str), Some("ezjson"));
        assert_eq!(v.get("count"), Some(&Value::Int(4)));
        assert_eq!(v.get("COUNT"), None);
        assert_eq!(v.get_ignore_ascii_case("COUNT"), Some(&Value::Int(3)));
        assert_eq!(v.get("list").and_then(|l| l.at(3)), None);
        assert_eq!(v.at(0), None);
        assert_eq!(Value::Int(1).get("name"), None);
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let v = Value::Object(vec![("x".into(), Value::Int(1)), ("x".into(), Value::Int(2))]);
        assert_eq!(v.get("x"), Some(&Value::Int(1)));
        assert_eq!(v.len(), 2);
        assert_eq!(v.release(), 3);
    }

    #[test]
    fn test_release_counts_every_node() {
        assert_eq!(Value::Null.release(), 1);
        assert_eq!(Value::Array(vec![]).release(), 1);
        assert_eq!(sample().release(), 8);
    }

    #[test]
    fn test_release_deep_tree() {
        let mut v = Value::Null;
        for _ in 0..100_000 {
            v = Value::Array(vec![v]);
        }
        assert_eq!(v.release(), 100_001);
    }
}

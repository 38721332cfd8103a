//! Serde support for [`Value`] (feature-gated)
//!
//! Values map onto the serde data model one to one, so any self-describing
//! format can be decoded into a [`Value`] and checked against a validating
//! type.
//!
//! # Example
//!
//! ```rust,ignore
//! use vtypes::predicate::*;
//! use vtypes::{vtype, Kind, Value};
//!
//! let port = vtype("Port", Kind::Int, (between(1, 65535), "valid port")).unwrap();
//!
//! let decoded: Value = serde_json::from_str("8080").unwrap();
//! assert!(port.is_instance(&decoded));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        // Out-of-range unsigned integers degrade to floats
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            map.insert(k, v);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{between, has_key};
    use crate::{vtype, Kind};

    #[test]
    fn test_deserialize_json_document() {
        let v: Value = serde_json::from_str(r#"{"port": 8080, "hosts": ["a", "b"], "tls": null}"#)
            .unwrap();
        let Value::Map(map) = &v else {
            panic!("expected a map, got {}", v);
        };
        assert_eq!(map["port"], Value::Int(8080));
        assert_eq!(map["hosts"], Value::from(vec!["a", "b"]));
        assert_eq!(map["tls"], Value::Null);
    }

    #[test]
    fn test_serialize_round_trips_through_json() {
        let v = Value::from(vec![Value::from(1), Value::from(1.5), Value::from("x")]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"[1,1.5,"x"]"#);
    }

    #[test]
    fn test_decoded_values_are_checked() {
        let port = vtype("Port", Kind::Int, (between(1, 65535), "valid port")).unwrap();
        let config = vtype("Config", Kind::Map, (has_key("port"), "has a port")).unwrap();

        let decoded: Value = serde_json::from_str("8080").unwrap();
        assert!(port.is_instance(&decoded));

        let decoded: Value = serde_json::from_str("70000").unwrap();
        assert!(!port.is_instance(&decoded));

        let decoded: Value = serde_json::from_str(r#"{"host": "x"}"#).unwrap();
        assert!(config.has_valid_type(&decoded));
        assert!(!config.is_instance(&decoded));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let v: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v.kind(), Kind::Float);
    }
}

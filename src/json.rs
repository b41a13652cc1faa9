use serde_json::{Map, Number};

use crate::builder::format_path;
use crate::encode::Format;
use crate::error::BencodeError;
use crate::source::Destination;
use crate::value::Value;

/// Renders a tree as JSON for inspection.
///
/// Byte strings become JSON strings, with invalid UTF-8 replaced by U+FFFD,
/// so the output is a readable projection and cannot be decoded back into
/// the same tree.
///
/// ```
/// use rbit_bencode::{decode, Format, JsonFormat};
///
/// let value = decode(b"d3:cow3:moo4:spamli1ei2eee").unwrap();
/// let mut out = Vec::new();
/// JsonFormat::default().encode(&value, &mut out).unwrap();
/// assert_eq!(out, br#"{"cow":"moo","spam":[1,2]}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl JsonFormat {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Format for JsonFormat {
    fn encode(&self, value: &Value, dest: &mut dyn Destination) -> Result<(), BencodeError> {
        if let Some(path) = value.find_hole() {
            return Err(BencodeError::UnassignedPlaceholder(format_path(&path)));
        }

        let json = to_json(value);
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(&json)?
        } else {
            serde_json::to_vec(&json)?
        };
        dest.add(&rendered)
    }
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(i) => serde_json::Value::Number(Number::from(*i)),
        Value::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
        Value::List(l) => serde_json::Value::Array(l.iter().map(to_json).collect()),
        Value::Dict(d) => {
            let mut map = Map::new();
            for (k, v) in d {
                map.insert(String::from_utf8_lossy(k).into_owned(), to_json(v));
            }
            serde_json::Value::Object(map)
        }
        Value::Hole => serde_json::Value::Null,
    }
}

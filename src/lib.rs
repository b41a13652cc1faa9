//! Strict bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! The decoder only accepts canonical input: dictionary keys strictly
//! increasing, no leading zeros, no `-0`. Anything it accepts re-encodes to
//! exactly the same bytes.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbit_bencode::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a list
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Decode a dictionary
//! let value = decode(b"d3:foo3:bare").unwrap();
//! let foo = value.get(b"foo").unwrap();
//! assert_eq!(foo.as_str(), Some("bar"));
//! ```
//!
//! ## Building and encoding
//!
//! ```
//! use rbit_bencode::{encode, Value};
//!
//! let mut torrent = Value::Hole;
//! torrent.set_key("announce", "http://tracker.example.com/announce")?;
//! torrent.entry("info")?.set_key("name", "example.txt")?;
//! torrent.entry("info")?.set_key("length", 1024)?;
//!
//! let encoded = encode(&torrent)?;
//! assert!(encoded.starts_with(b"d8:announce"));
//! # Ok::<(), rbit_bencode::BencodeError>(())
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::Syntax`] - the input breaks a grammar rule; the
//!   [`SyntaxError`] names which one and the offset says where
//! - [`BencodeError::IntegerOverflow`] - well-formed digits outside `i64`
//! - [`BencodeError::TypeMismatch`] - a typed accessor hit the wrong kind
//! - [`BencodeError::SourceExhausted`] - input ended inside a string body
//! - [`BencodeError::NoRoot`] / [`BencodeError::UnassignedPlaceholder`] -
//!   nothing, or an incomplete tree, to encode
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod builder;
mod codec;
pub mod constants;
mod decode;
mod encode;
mod error;
mod json;
mod source;
mod value;
pub mod visit;

pub use builder::{format_path, PathSegment};
pub use codec::Bencode;
pub use decode::{decode, decode_source, decode_with, DecoderConfig};
pub use encode::{encode, BencodeFormat, Format};
pub use error::{BencodeError, Kind, SyntaxError};
pub use json::JsonFormat;
pub use source::{BufferDestination, BufferSource, Destination, FileDestination, Source};
pub use value::Value;
pub use visit::{walk, walk_mut, Stats, Visitor, VisitorMut};


#[cfg(test)]
mod proptests;

use tracing::{debug, trace};

use crate::decode::{decode_source, DecoderConfig};
use crate::encode::{BencodeFormat, Format};
use crate::error::BencodeError;
use crate::source::{Destination, Source};
use crate::value::Value;

/// A codec that owns the most recently decoded or built tree.
///
/// # Examples
///
/// ```
/// use rbit_bencode::{Bencode, BufferDestination, BufferSource};
///
/// let mut codec = Bencode::new();
/// let mut source = BufferSource::new(&b"d3:cow3:moo4:spam4:eggse"[..]);
/// let root = codec.decode(&mut source)?;
/// assert_eq!(root.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
///
/// let mut out = BufferDestination::new();
/// codec.encode(&mut out)?;
/// assert_eq!(out.as_bytes(), b"d3:cow3:moo4:spam4:eggse");
/// # Ok::<(), rbit_bencode::BencodeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bencode {
    config: DecoderConfig,
    root: Option<Value>,
}

impl Bencode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config, root: None }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes one value from `source`, replacing the current tree.
    ///
    /// The previous tree is dropped even if decoding fails; on failure the
    /// codec holds no tree.
    pub fn decode<S>(&mut self, source: &mut S) -> Result<&Value, BencodeError>
    where
        S: Source + ?Sized,
    {
        self.root = None;
        let start = source.position();
        match decode_source(source, &self.config) {
            Ok(value) => {
                trace!("decoded {} bytes", source.position() - start);
                let root: &Value = self.root.insert(value);
                Ok(root)
            }
            Err(e) => {
                debug!("bencode decode rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Writes the current tree in canonical bencode.
    pub fn encode(&self, dest: &mut dyn Destination) -> Result<(), BencodeError> {
        self.encode_with(&BencodeFormat, dest)
    }

    /// Writes the current tree with any [`Format`].
    pub fn encode_with(
        &self,
        format: &dyn Format,
        dest: &mut dyn Destination,
    ) -> Result<(), BencodeError> {
        match &self.root {
            None | Some(Value::Hole) => Err(BencodeError::NoRoot),
            Some(root) => format.encode(root, dest),
        }
    }

    /// The current tree, if one has been decoded or assigned.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// The current tree for building in place.
    ///
    /// If there is none yet, an unassigned hole is installed so builder
    /// methods can turn it into a dictionary or list.
    pub fn root_mut(&mut self) -> &mut Value {
        self.root.get_or_insert(Value::Hole)
    }

    pub fn set_root(&mut self, value: impl Into<Value>) {
        self.root = Some(value.into());
    }

    pub fn take_root(&mut self) -> Option<Value> {
        self.root.take()
    }
}

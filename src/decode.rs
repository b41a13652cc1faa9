use bytes::Bytes;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN, INTEGER_BUFFER_LEN};
use crate::error::{BencodeError, SyntaxError};
use crate::source::{BufferSource, Source};
use crate::value::Value;

/// Limits and policy applied while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest nesting accepted. The root value is at depth 1.
    pub max_depth: usize,
    /// Longest byte string accepted.
    pub max_string_len: usize,
    /// Reject dictionaries whose keys are not strictly increasing.
    ///
    /// When disabled, keys may arrive in any order and a repeated key keeps
    /// its last value. Such input no longer re-encodes to the same bytes.
    pub strict_keys: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            strict_keys: true,
        }
    }
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_strict_keys(mut self, strict_keys: bool) -> Self {
        self.strict_keys = strict_keys;
        self
    }
}

/// Decodes a complete bencode value from a byte slice with the default limits.
///
/// The whole input must be consumed; anything after the value is an error.
///
/// # Examples
///
/// ```
/// use rbit_bencode::{decode, Value};
///
/// assert_eq!(decode(b"i266e").unwrap(), Value::Integer(266));
/// assert!(decode(b"i012e").unwrap_err().is_syntax());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_with(data, &DecoderConfig::default())
}

/// Like [`decode`], with explicit limits.
pub fn decode_with(data: &[u8], config: &DecoderConfig) -> Result<Value, BencodeError> {
    let mut source = BufferSource::new(Bytes::copy_from_slice(data));
    decode_source(&mut source, config)
}

/// Decodes one value from `source` and checks that nothing follows it.
pub fn decode_source<S>(source: &mut S, config: &DecoderConfig) -> Result<Value, BencodeError>
where
    S: Source + ?Sized,
{
    let mut decoder = Decoder { source, config };
    let value = decoder.decode_value(1)?;

    if decoder.source.more() {
        return Err(decoder.syntax(SyntaxError::TrailingData));
    }

    Ok(value)
}

struct Decoder<'a, S: Source + ?Sized> {
    source: &'a mut S,
    config: &'a DecoderConfig,
}

impl<S: Source + ?Sized> Decoder<'_, S> {
    fn syntax(&self, kind: SyntaxError) -> BencodeError {
        BencodeError::Syntax {
            offset: self.source.position(),
            kind,
        }
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > self.config.max_depth {
            return Err(self.syntax(SyntaxError::MaxDepthExceeded(self.config.max_depth)));
        }

        match self.source.current() {
            None => Err(self.syntax(SyntaxError::UnexpectedEof)),
            Some(b'i') => self.decode_integer(),
            Some(b'l') => self.decode_list(depth),
            Some(b'd') => self.decode_dict(depth),
            Some(b'0'..=b'9') => self.decode_bytes().map(Value::Bytes),
            Some(c) => Err(self.syntax(SyntaxError::InvalidLeadingByte(c))),
        }
    }

    fn decode_integer(&mut self) -> Result<Value, BencodeError> {
        self.source.next();
        let value = self.read_number(b'e')?;
        self.source.next();
        Ok(Value::Integer(value))
    }

    fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let len = self.read_number(b':')?;
        if len < 0 {
            return Err(self.syntax(SyntaxError::NegativeLength));
        }

        let len = len as u64;
        if len > self.config.max_string_len as u64 {
            return Err(self.syntax(SyntaxError::StringTooLong {
                len,
                max: self.config.max_string_len,
            }));
        }

        self.source.next();
        self.source.take(len as usize)
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.source.next();
        let mut list = Vec::new();

        loop {
            match self.source.current() {
                None => return Err(self.syntax(SyntaxError::Unterminated("list"))),
                Some(b'e') => break,
                Some(_) => list.push(self.decode_value(depth + 1)?),
            }
        }

        self.source.next();
        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.source.next();
        let mut dict = BTreeMap::new();
        let mut previous: Option<Bytes> = None;

        loop {
            match self.source.current() {
                None => return Err(self.syntax(SyntaxError::Unterminated("dictionary"))),
                Some(b'e') => break,
                Some(b'0'..=b'9' | b'-') => {}
                Some(c) => return Err(self.syntax(SyntaxError::InvalidKey(c))),
            }

            let key_offset = self.source.position();
            let key = self.decode_bytes()?;

            if self.config.strict_keys {
                if let Some(previous) = &previous {
                    let violation = match key.cmp(previous) {
                        Ordering::Greater => None,
                        Ordering::Equal => Some(SyntaxError::DuplicateKey(lossy(&key))),
                        Ordering::Less => Some(SyntaxError::KeyOrder(lossy(&key))),
                    };
                    if let Some(kind) = violation {
                        return Err(BencodeError::Syntax {
                            offset: key_offset,
                            kind,
                        });
                    }
                }
            }

            let value = self.decode_value(depth + 1)?;
            dict.insert(key.clone(), value);
            previous = Some(key);
        }

        self.source.next();
        Ok(Value::Dict(dict))
    }

    /// Reads an optionally signed decimal number up to (not past) `terminator`.
    ///
    /// Used for both integer bodies and string length prefixes, so both get
    /// the same canonical-form checks and the same fixed digit buffer.
    fn read_number(&mut self, terminator: u8) -> Result<i64, BencodeError> {
        let mut buf = [0u8; INTEGER_BUFFER_LEN];
        let mut len = 0;

        loop {
            let c = match self.source.current() {
                None => return Err(self.syntax(SyntaxError::UnexpectedEof)),
                Some(c) if c == terminator => break,
                Some(c) => c,
            };

            if !(c.is_ascii_digit() || (c == b'-' && len == 0)) {
                return Err(self.syntax(SyntaxError::InvalidDigit(c)));
            }
            // One slot stays reserved for the terminator.
            if len == INTEGER_BUFFER_LEN - 1 {
                return Err(self.syntax(SyntaxError::IntegerBufferOverflow));
            }

            buf[len] = c;
            len += 1;
            self.source.next();
        }

        let text = &buf[..len];
        let (negative, digits) = match text.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, text),
        };

        match digits {
            [] => return Err(self.syntax(SyntaxError::EmptyInteger)),
            [b'0', ..] if negative => return Err(self.syntax(SyntaxError::NegativeZero)),
            [b'0', _, ..] => return Err(self.syntax(SyntaxError::LeadingZero)),
            _ => {}
        }

        // Accumulate on the negative side when needed so i64::MIN parses.
        let mut value: i64 = 0;
        for &d in digits {
            let d = i64::from(d - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(d)
                    } else {
                        v.checked_add(d)
                    }
                })
                .ok_or_else(|| {
                    BencodeError::IntegerOverflow(String::from_utf8_lossy(text).into_owned())
                })?;
        }

        Ok(value)
    }
}

fn lossy(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}

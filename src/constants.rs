//! Default limits used by the decoder.

/// Default maximum nesting depth. The root value sits at depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default ceiling for a single byte string (128 MiB).
///
/// Rejects absurd length prefixes in malformed input before any bytes are
/// read.
pub const DEFAULT_MAX_STRING_LEN: usize = 128 * 1024 * 1024;

/// Size of the digit buffer used when reading integers and string lengths:
/// sign, 19 digits of `i64::MAX`, and the terminator.
pub const INTEGER_BUFFER_LEN: usize = 21;

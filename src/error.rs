//! Error types for color resolution.
//!
//! Every public function returns a [`ResolveError`] on failure; no panic
//! crosses the crate boundary. Errors carry the offending input text or byte
//! length for diagnostics; status codes and user-facing messages are the
//! caller's responsibility.

use thiserror::Error;

/// Errors that can occur while resolving text or image input to a color.
///
/// # Examples
///
/// ```rust
/// use huecast::{text_to_color, ResolveError};
///
/// let err = text_to_color("   ").unwrap_err();
/// assert!(matches!(err, ResolveError::EmptyInput));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Input was empty or whitespace-only.
    #[error("empty color input")]
    EmptyInput,

    /// Input matched the shape of a structural grammar (`rgb()`, `hsl()`,
    /// hex, plain triple) but a component failed to parse or the component
    /// count was wrong. Structural shape matches are terminal: they never
    /// fall through to name resolution.
    #[error("malformed color value {input:?}: {reason}")]
    MalformedStructuredColor {
        /// The original input text, verbatim.
        input: String,
        /// What was wrong with the matched shape.
        reason: String,
    },

    /// No structural, named, heuristic, or fuzzy strategy produced a color.
    #[error("unrecognized color {input:?}")]
    UnrecognizedColor {
        /// The original input text, verbatim.
        input: String,
    },

    /// Image bytes could not be decoded (corrupt data or unsupported
    /// format).
    #[error("invalid image ({byte_len} bytes): {reason}")]
    InvalidImage {
        /// Length of the rejected byte buffer.
        byte_len: usize,
        /// Decoder error description.
        reason: String,
    },

    /// A decoded image produced no usable pixels after sampling and the
    /// palette fallback also came up empty.
    #[error("image produced no usable pixels ({byte_len} bytes)")]
    DegenerateImage {
        /// Length of the source byte buffer.
        byte_len: usize,
    },
}

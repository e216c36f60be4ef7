//! # huecast: free-form color resolution
//!
//! Resolves an arbitrary description of a color, free text or a raster
//! image, into a canonical RGB triple and uppercase hex string.
//!
//! Text resolution runs a fixed chain of strategies and stops at the first
//! success:
//!
//! - **Structured formats**: 3/6-digit hex (`#` optional), `rgb()`/`rgba()`,
//!   `hsl()`/`hsla()`, plain numeric triples
//! - **Named colors**: an immutable table of CSS3 color keywords
//! - **Phrase heuristics**: adjective stripping, subphrase candidates,
//!   multi-color averaging
//! - **Fuzzy matching**: approximate lookup against the named table
//!
//! Image resolution decodes PNG/JPEG/GIF/WebP/BMP bytes, composites
//! transparency over a background fill, downsamples, and picks the dominant
//! color from an exact histogram (with an adaptive-palette fallback).
//!
//! ## Quick Start
//!
//! ```rust
//! use huecast::text_to_color;
//!
//! let teal = text_to_color("teal").unwrap();
//! assert_eq!(teal.hex, "#008080");
//! assert_eq!((teal.rgb.r, teal.rgb.g, teal.rgb.b), (0, 128, 128));
//!
//! assert_eq!(text_to_color("rgb(300, -10, 128)").unwrap().hex, "#FF0080");
//! assert_eq!(text_to_color("crimson yellow").unwrap().hex, "#EE8A1E");
//! ```
//!
//! Every call is pure and synchronous; the only shared state is the
//! immutable named-color table, safe for unbounded concurrent readers.
//! Identical input always produces bit-identical output.

pub mod color;
pub mod error;
pub mod extract;
mod fuzzy;
pub mod names;
pub mod normalize;
mod parse;
pub mod resolve;

pub use color::Rgb;
pub use error::ResolveError;
pub use extract::{ExtractOptions, image_to_color};
pub use resolve::{ResolvedColor, text_to_color};

//! Permissive JSON5 decoding into statically typed Rust values.
//!
//! Text is read into a [`Value`] tree whose numeric tokens are kept verbatim
//! as validated [`Number`] literals; a target implementing [`Decode`] then
//! pulls out what it needs, converting each literal exactly for its own width.
//!
//! ```
//! json5b::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Config {
//!         pub port: u16 => { json5 = "port" },
//!         pub ratio: f64,
//!         pub tags: Vec<String>,
//!     }
//! }
//!
//! let config: Config = json5b::from_str("{
//!     // comments and trailing commas are fine
//!     port: 0x1F90,
//!     ratio: '.5',
//!     tags: ['a', 'b',],
//! }").unwrap();
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.ratio, 0.5);
//! assert_eq!(config.tags, ["a", "b"]);
//! ```
pub mod decode;
pub mod dynamic;
pub mod error;
pub mod number;
pub mod parse;
pub mod value;

pub use decode::{Decode, DecodeOptions, Path, Record, TargetKind};
pub use dynamic::Dynamic;
pub use error::{ConversionError, DecodeError, Error, GrammarError, ParseError, Result};
pub use number::{Number, is_valid_number};
pub use parse::decode_literal_text;
pub use value::{Value, ValueKind};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}

/// Parse `text` and decode it into `target` with default options.
pub fn unmarshal<T: Decode>(text: &str, target: &mut T) -> Result<()> {
    unmarshal_with(text, target, &DecodeOptions::default())
}

/// Parse `text` and decode it into `target`.
///
/// Fields assigned before a decode error stay assigned.
pub fn unmarshal_with<T: Decode>(text: &str, target: &mut T, options: &DecodeOptions) -> Result<()> {
    let value = parse::decode_literal_text_with(text, options.max_depth)?;
    decode::decode_value(&value, target, options)?;
    Ok(())
}

/// Decode `text` into a fresh `T`.
pub fn from_str<T: Decode + Default>(text: &str) -> Result<T> {
    let mut out = T::default();
    unmarshal(text, &mut out)?;
    Ok(out)
}

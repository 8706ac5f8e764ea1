//! Utility code shared across layers.
//!
//! - [`code_encoder`] - Hashids-style reversible encoding of sequence values
//!   into short codes

pub mod code_encoder;

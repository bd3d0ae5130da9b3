//! # typed-routes-codecs
//!
//! Bidirectional string ⇄ value codecs for typed-routes:
//!
//! - [`codec`] - The [`Codec`] trait and the query decoding context
//! - [`primitives`] - Boolean, Number, String, Date, literal and wrapper codecs
//! - [`array`] - The array codec and its four serialization formats
//! - [`registry`] - The process-wide named codec registry
//!
//! Every codec satisfies the round-trip invariant `decode(encode(v)) == v`
//! for all values in its domain, and fails (rather than coercing) on text
//! outside its grammar.

pub mod array;
pub mod codec;
pub mod primitives;
pub mod registry;

pub use array::{array, array_with, ArrayCodec, ArrayFormat, ArrayOptions};
pub use codec::{Codec, QueryContext, SharedCodec};
pub use primitives::{
    boolean, date, null, nullish, number, number_literal, string, string_literal, undefined,
    BooleanCodec, DateCodec, NullCodec, NumberCodec, NumberLiteralCodec, StringCodec,
    StringLiteralCodec, UndefinedCodec,
};
pub use registry::{add_codec, add_codec_factory, get, get_factory, names, CodecFactory};

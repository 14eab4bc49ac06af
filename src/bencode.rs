//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the self-delimiting serialization used by `.torrent` files.
//! Every value starts with a byte that says what follows, so a decoder never
//! needs to backtrack.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Decoding
//!
//! ```
//! use bitmeta::bencode::{decode, Value};
//!
//! let value = decode(b"d3:food3:bar3:bazee").unwrap();
//! let inner = value.get(b"foo").unwrap();
//! assert_eq!(inner.get(b"bar").and_then(Value::as_str), Some("baz"));
//! ```
//!
//! Input can also be pulled from any [`std::io::BufRead`] with
//! [`decode_from`] or a [`Decoder`]; only the bytes belonging to the value
//! are consumed.
//!
//! # Encoding
//!
//! ```
//! use bitmeta::bencode::{encode, Value};
//!
//! let list = Value::List(vec![Value::Integer(123), Value::Integer(456)]);
//! assert_eq!(encode(&list).unwrap(), b"li123ei456ee");
//! ```
//!
//! Output is always canonical: dictionary keys are written in ascending
//! raw-byte order. For any canonical input, `encode(decode(x)) == x`.
//!
//! # Error Handling
//!
//! Decoding stops at the first malformed primitive:
//!
//! - [`BencodeError::InvalidLeadingByte`] - no value can start with this byte, or input is empty
//! - [`BencodeError::ReadLengthFailed`] - a length prefix has no `:`
//! - [`BencodeError::InvalidLengthFormat`] - a length prefix is not a decimal number
//! - [`BencodeError::ReadValueFailed`] - string payload cut short, or integer text unparsable
//! - [`BencodeError::InvalidEndingByte`] - integer, list or dictionary never terminated
//! - [`BencodeError::NestingTooDeep`] - nesting beyond [`DecoderConfig::max_depth`]
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod config;
mod decode;
mod encode;
mod error;
mod value;

pub use config::DecoderConfig;
pub use decode::{decode, decode_from, decode_with, Decoder};
pub use encode::{encode, encode_into, encoded_len, Encoder};
pub use error::BencodeError;
pub use value::{Dict, Value};

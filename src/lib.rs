//! bitmeta - Bencode and BitTorrent metainfo
//!
//! Decodes and encodes the bencode format used by `.torrent` files, and
//! projects decoded documents into a typed description of the shared
//! content.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - BEP-3 torrent metainfo
//! - [`constants`] - Format constants and decoder limits

pub mod bencode;
pub mod constants;
pub mod metainfo;

pub use bencode::{decode, encode, BencodeError, DecoderConfig, Value};
pub use metainfo::{File, FileMode, Info, InfoHash, Metainfo, MetainfoError};

//! Torrent metainfo handling ([BEP-3]).
//!
//! A `.torrent` file is a bencoded dictionary describing content to be
//! shared: file names and sizes, a SHA-1 hash per piece, and the trackers
//! to announce to. [`Metainfo`] is the typed projection of that dictionary.
//!
//! # Examples
//!
//! ```
//! use bitmeta::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = b"d8:announce35:https://torrent.ubuntu.com/announce\
//!              13:creation datei1724947415e\
//!              4:infod5:filesld6:lengthi3e4:pathl1:a5:b.txteed6:lengthi4e4:pathl5:c.txteee\
//!              4:name3:dir12:piece lengthi262144e6:pieces0:ee";
//! let torrent = Metainfo::from_bytes(data)?;
//!
//! println!("Name: {}", torrent.info.name);
//! println!("Info hash: {}", torrent.info_hash);
//! for file in torrent.info.files() {
//!     println!("  {} ({} bytes)", file.path.display(), file.length);
//! }
//! assert_eq!(torrent.info.total_length(), 7);
//! assert_eq!(torrent.creation_date.map(|d| d.timestamp()), Some(1724947415));
//! # Ok(())
//! # }
//! ```
//!
//! # Torrent Structure
//!
//! - **announce** - Primary tracker URL (required)
//! - **announce-list** - Additional tracker tiers (BEP-12)
//! - **creation date** - Unix timestamp when created
//! - **comment**, **created by**, **encoding** - Free text
//! - **info** - Content description (required, hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA-1 hashes of each piece
//!   - `private` - `1` to disable DHT/PEX
//!   - `length` and optional `md5sum` (single-file) OR `files` list (multi-file)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod fields;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use torrent::{File, FileMode, Info, Md5Sum, Metainfo, PieceHash};

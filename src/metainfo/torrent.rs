use super::error::MetainfoError;
use super::fields::Fields;
use super::info_hash::InfoHash;
use crate::bencode::{decode, decode_from, encode, Dict, Encoder, Value};
use crate::constants::{MD5_LEN, PIECE_HASH_LEN};
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use hex::FromHex;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// SHA-1 of one piece.
pub type PieceHash = [u8; PIECE_HASH_LEN];

/// MD5 of a file's contents, as carried by the optional `md5sum` field.
pub type Md5Sum = [u8; MD5_LEN];

/// A parsed torrent file.
///
/// # Examples
///
/// ```
/// use bitmeta::metainfo::{FileMode, Metainfo};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = b"d8:announce23:http://tracker/announce\
///              4:infod6:lengthi1024e4:name8:file.bin12:piece lengthi16384e6:pieces0:ee";
/// let torrent = Metainfo::from_bytes(data)?;
///
/// assert_eq!(torrent.announce, "http://tracker/announce");
/// assert_eq!(torrent.info.name, "file.bin");
/// assert!(matches!(torrent.info.mode, FileMode::Single { length: 1024, .. }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// Primary tracker URL.
    pub announce: String,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    /// Empty when absent or malformed.
    pub announce_list: Vec<Vec<String>>,
    pub comment: Option<String>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    /// Character set the text fields were written in.
    pub encoding: Option<String>,
    pub info: Info,
    /// SHA-1 of the canonically re-encoded info dictionary.
    pub info_hash: InfoHash,
    raw_info: Bytes,
}

/// The info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// File name in single-file mode, directory name in multi-file mode.
    pub name: String,
    /// Number of bytes per piece.
    pub piece_length: u64,
    /// One hash per piece, in order.
    pub pieces: Vec<PieceHash>,
    /// Restricts peer discovery to the listed trackers.
    pub private: bool,
    pub mode: FileMode,
}

/// Whether the torrent describes one file or a tree of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMode {
    Single {
        length: u64,
        md5sum: Option<Md5Sum>,
    },
    /// Never empty.
    Multi { files: Vec<File> },
}

/// A file within a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Size of the file in bytes.
    pub length: u64,
    pub md5sum: Option<Md5Sum>,
    /// Path relative to the torrent's root directory.
    pub path: PathBuf,
}

impl Metainfo {
    /// Parses a torrent file from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not bencode, is not a dictionary, or
    /// fails [`Metainfo::from_dict`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let value = decode(data)?;
        let dict = value.as_dict().ok_or(MetainfoError::InvalidField("root"))?;
        Self::from_dict(dict)
    }

    /// Parses a torrent file from a buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MetainfoError> {
        let value = decode_from(reader)?;
        let dict = value.as_dict().ok_or(MetainfoError::InvalidField("root"))?;
        Self::from_dict(dict)
    }

    /// Projects a decoded top-level dictionary.
    ///
    /// Required fields that are absent or mistyped fail with
    /// [`MetainfoError::MissingField`]. Optional fields of the wrong type are
    /// dropped.
    ///
    /// # Errors
    ///
    /// - `announce`, `info`, `info.piece length`, `info.pieces` and
    ///   `info.name` are required
    /// - `info` needs either `length` or a non-empty `files` list
    /// - `pieces` must be a whole number of 20-byte hashes
    /// - `piece length` must be positive and lengths non-negative
    /// - `md5sum` must be 32 hex digits
    pub fn from_dict(dict: &Dict) -> Result<Self, MetainfoError> {
        let fields = Fields::new(dict);

        let announce = fields
            .required::<&str>("announce", "announce")?
            .to_string();

        let announce_list = fields
            .optional::<&[Value]>("announce-list")
            .and_then(|tiers| {
                let parsed = parse_announce_list(tiers);
                if parsed.is_none() {
                    tracing::debug!("ignoring malformed announce-list");
                }
                parsed
            })
            .unwrap_or_default();

        let comment = fields.optional::<&str>("comment").map(String::from);
        let created_by = fields.optional::<&str>("created by").map(String::from);
        let encoding = fields.optional::<&str>("encoding").map(String::from);

        let creation_date = fields.optional::<i64>("creation date").and_then(|secs| {
            let date = DateTime::from_timestamp(secs, 0);
            if date.is_none() {
                tracing::debug!("ignoring out-of-range creation date {}", secs);
            }
            date
        });

        let info_dict = fields.required::<&Dict>("info", "info")?;
        let info = Info::from_dict(info_dict)?;

        let mut raw_info = Vec::new();
        Encoder::new(&mut raw_info).encode_dict(info_dict)?;
        let info_hash = InfoHash::from_info_bytes(&raw_info);

        Ok(Self {
            announce,
            announce_list,
            comment,
            created_by,
            creation_date,
            encoding,
            info,
            info_hash,
            raw_info: Bytes::from(raw_info),
        })
    }

    /// The canonical bencoding of the info dictionary the hash was taken of.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker comes first, followed by the tiers in order.
    /// Duplicates are removed.
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers = vec![self.announce.clone()];

        for tier in &self.announce_list {
            for tracker in tier {
                if !trackers.contains(tracker) {
                    trackers.push(tracker.clone());
                }
            }
        }

        trackers
    }

    /// Rebuilds a document from the projected fields.
    ///
    /// Keys the projection does not model are not carried over, so the
    /// result's info hash only matches the original when the original info
    /// dictionary held nothing else.
    pub fn to_value(&self) -> Value {
        let mut dict = Dict::new();
        insert(&mut dict, "announce", self.announce.as_str());

        if !self.announce_list.is_empty() {
            let tiers = self
                .announce_list
                .iter()
                .map(|tier| Value::List(tier.iter().map(|url| url.as_str().into()).collect()))
                .collect::<Vec<_>>();
            insert(&mut dict, "announce-list", tiers);
        }
        if let Some(comment) = &self.comment {
            insert(&mut dict, "comment", comment.as_str());
        }
        if let Some(created_by) = &self.created_by {
            insert(&mut dict, "created by", created_by.as_str());
        }
        if let Some(date) = &self.creation_date {
            insert(&mut dict, "creation date", date.timestamp());
        }
        if let Some(encoding) = &self.encoding {
            insert(&mut dict, "encoding", encoding.as_str());
        }
        insert(&mut dict, "info", self.info.to_value());

        Value::Dict(dict)
    }

    /// Canonical bencoding of [`Metainfo::to_value`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, MetainfoError> {
        Ok(encode(&self.to_value())?)
    }
}

impl Info {
    fn from_dict(dict: &Dict) -> Result<Self, MetainfoError> {
        let fields = Fields::new(dict);

        let piece_length = fields.required::<i64>("piece length", "piece length")?;
        let piece_length = u64::try_from(piece_length)
            .ok()
            .filter(|&len| len > 0)
            .ok_or(MetainfoError::InvalidField("piece length"))?;

        let pieces_bytes = fields.required::<&Bytes>("pieces", "pieces")?;
        if pieces_bytes.len() % PIECE_HASH_LEN != 0 {
            return Err(MetainfoError::InvalidField("pieces"));
        }
        let pieces = pieces_bytes
            .chunks_exact(PIECE_HASH_LEN)
            .map(|chunk| {
                let mut hash = [0u8; PIECE_HASH_LEN];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        let private = fields.optional::<i64>("private") == Some(1);

        let name = fields.required::<&str>("name", "name")?.to_string();

        let mode = if let Some(length) = fields.optional::<i64>("length") {
            FileMode::Single {
                length: non_negative(length, "length")?,
                md5sum: parse_md5sum(fields)?,
            }
        } else if let Some(entries) = fields
            .optional::<&[Value]>("files")
            .filter(|entries| !entries.is_empty())
        {
            let files = entries
                .iter()
                .map(|entry| {
                    let dict = entry
                        .as_dict()
                        .ok_or(MetainfoError::MissingField("length-or-files"))?;
                    File::from_dict(dict)
                })
                .collect::<Result<Vec<_>, _>>()?;
            FileMode::Multi { files }
        } else {
            return Err(MetainfoError::MissingField("length-or-files"));
        };

        Ok(Self {
            name,
            piece_length,
            pieces,
            private,
            mode,
        })
    }

    /// Total size of all files combined.
    pub fn total_length(&self) -> u64 {
        match &self.mode {
            FileMode::Single { length, .. } => *length,
            FileMode::Multi { files } => files.iter().map(|f| f.length).sum(),
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_multi_file(&self) -> bool {
        matches!(self.mode, FileMode::Multi { .. })
    }

    /// Every file in the torrent. A single-file torrent yields one entry
    /// whose path is the torrent name.
    pub fn files(&self) -> Vec<File> {
        match &self.mode {
            FileMode::Single { length, md5sum } => vec![File {
                length: *length,
                md5sum: *md5sum,
                path: PathBuf::from(&self.name),
            }],
            FileMode::Multi { files } => files.clone(),
        }
    }

    fn to_value(&self) -> Value {
        let mut dict = Dict::new();
        insert(&mut dict, "name", self.name.as_str());
        insert(&mut dict, "piece length", self.piece_length as i64);

        let mut pieces = BytesMut::with_capacity(self.pieces.len() * PIECE_HASH_LEN);
        for hash in &self.pieces {
            pieces.extend_from_slice(hash);
        }
        insert(&mut dict, "pieces", pieces.freeze());

        if self.private {
            insert(&mut dict, "private", 1i64);
        }

        match &self.mode {
            FileMode::Single { length, md5sum } => {
                insert(&mut dict, "length", *length as i64);
                if let Some(md5sum) = md5sum {
                    insert(&mut dict, "md5sum", hex::encode(md5sum));
                }
            }
            FileMode::Multi { files } => {
                let files = files.iter().map(File::to_value).collect::<Vec<_>>();
                insert(&mut dict, "files", files);
            }
        }

        Value::Dict(dict)
    }
}

impl File {
    fn from_dict(dict: &Dict) -> Result<Self, MetainfoError> {
        let fields = Fields::new(dict);

        let length = fields.required::<i64>("length", "file.length")?;
        let length = non_negative(length, "file.length")?;

        let md5sum = parse_md5sum(fields)?;

        let segments = fields.required::<&[Value]>("path", "file.path")?;
        if segments.is_empty() {
            return Err(MetainfoError::MissingField("file.path"));
        }
        let mut path = PathBuf::new();
        for segment in segments {
            let segment = segment
                .as_str()
                .ok_or(MetainfoError::MissingField("file.path"))?;
            if !is_safe_segment(segment) {
                return Err(MetainfoError::InvalidField("file.path"));
            }
            path.push(segment);
        }

        Ok(Self {
            length,
            md5sum,
            path,
        })
    }

    fn to_value(&self) -> Value {
        let mut dict = Dict::new();
        insert(&mut dict, "length", self.length as i64);
        if let Some(md5sum) = &self.md5sum {
            insert(&mut dict, "md5sum", hex::encode(md5sum));
        }
        insert(&mut dict, "path", path_segments(&self.path));
        Value::Dict(dict)
    }
}

fn insert(dict: &mut Dict, key: &'static str, value: impl Into<Value>) {
    dict.insert(Bytes::from_static(key.as_bytes()), value.into());
}

fn parse_announce_list(tiers: &[Value]) -> Option<Vec<Vec<String>>> {
    tiers
        .iter()
        .map(|tier| {
            tier.as_list()?
                .iter()
                .map(|url| url.as_str().map(String::from))
                .collect()
        })
        .collect()
}

/// A digest must be hex and decode to exactly one MD5; well-formed hex of
/// any other length is as unusable as bad hex.
fn parse_md5sum(fields: Fields<'_>) -> Result<Option<Md5Sum>, MetainfoError> {
    fields
        .optional::<&Bytes>("md5sum")
        .map(|digest| {
            <Md5Sum as FromHex>::from_hex(digest).map_err(|e| {
                match e {
                    hex::FromHexError::InvalidStringLength => tracing::debug!(
                        "md5sum has {} hex digits, expected {}",
                        digest.len(),
                        MD5_LEN * 2
                    ),
                    other => tracing::debug!("md5sum is not hex: {}", other),
                }
                MetainfoError::InvalidField("md5sum")
            })
        })
        .transpose()
}

fn non_negative(value: i64, field: &'static str) -> Result<u64, MetainfoError> {
    u64::try_from(value).map_err(|_| MetainfoError::InvalidField(field))
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

fn path_segments(path: &Path) -> Vec<Value> {
    path.iter()
        .map(|segment| Value::from(segment.to_string_lossy().into_owned()))
        .collect()
}

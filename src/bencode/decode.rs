use super::config::DecoderConfig;
use super::error::BencodeError;
use super::value::{Dict, Value};
use crate::constants::{MAX_INTEGER_DIGITS, MAX_LENGTH_DIGITS};
use bytes::Bytes;
use std::io::{self, BufRead, Read};

/// Decodes a single value from an in-memory buffer with the default
/// (lenient) configuration.
///
/// Bytes after the value are left alone; use [`decode_with`] and
/// [`DecoderConfig::strict`] to reject them.
///
/// # Examples
///
/// ```
/// use bitmeta::bencode::{decode, BencodeError, Value};
///
/// assert_eq!(decode(b"i-456e").unwrap(), Value::Integer(-456));
/// assert_eq!(decode(b"0:").unwrap(), Value::string(""));
/// assert!(matches!(decode(b"4:sp"), Err(BencodeError::ReadValueFailed)));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_with(data, &DecoderConfig::default())
}

pub fn decode_with(data: &[u8], config: &DecoderConfig) -> Result<Value, BencodeError> {
    Decoder::with_config(data, *config).decode()
}

/// Decodes a single value from a buffered reader, pulling bytes only as
/// far as the value extends.
pub fn decode_from<R: BufRead>(reader: R) -> Result<Value, BencodeError> {
    Decoder::new(reader).decode()
}

enum Scan {
    /// Text before the delimiter. `squeezed` is set when redundant leading
    /// zeros were dropped to stay under the limit.
    Found { text: Vec<u8>, squeezed: bool },
    Eof,
    /// The delimiter was found, but only after more than `limit` bytes.
    TooLong,
}

/// Recursive-descent decoder over a [`BufRead`] source.
///
/// Dispatch needs a single byte of lookahead, which comes straight out of
/// the reader's buffer, so nothing past the end of the current value is
/// consumed. A `Decoder` can therefore read several concatenated values
/// from one stream.
///
/// ```
/// use bitmeta::bencode::Decoder;
///
/// let mut decoder = Decoder::new(&b"i1e4:spam"[..]);
/// assert_eq!(decoder.decode_integer().unwrap(), 1);
/// assert_eq!(&decoder.decode_bytes().unwrap()[..], b"spam");
/// ```
pub struct Decoder<R> {
    reader: R,
    config: DecoderConfig,
    depth: usize,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes one value of any kind.
    ///
    /// # Errors
    ///
    /// The first malformed primitive met in document order ends the call.
    /// With `reject_trailing` set, unread bytes after the value fail with
    /// [`BencodeError::TrailingData`].
    pub fn decode(&mut self) -> Result<Value, BencodeError> {
        let value = self.decode_value().map_err(|e| {
            tracing::trace!("bencode decode failed: {}", e);
            e
        })?;

        if self.config.reject_trailing && self.peek()?.is_some() {
            return Err(BencodeError::TrailingData);
        }

        Ok(value)
    }

    /// Decodes `i<digits>e`.
    pub fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        self.expect_tag(b'i')?;

        let (text, squeezed) = match self.scan_until(b'e', MAX_INTEGER_DIGITS)? {
            Scan::Found { text, squeezed } => (text, squeezed),
            Scan::Eof => return Err(BencodeError::InvalidEndingByte),
            Scan::TooLong => return Err(BencodeError::ReadValueFailed),
        };

        if self.config.strict && (squeezed || !is_canonical_integer(&text)) {
            return Err(BencodeError::NonCanonical("integer"));
        }

        std::str::from_utf8(&text)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(BencodeError::ReadValueFailed)
    }

    /// Decodes `<length>:<bytes>`.
    pub fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        match self.peek()? {
            Some(b'0'..=b'9') => self.read_bytes(),
            _ => Err(BencodeError::InvalidLeadingByte),
        }
    }

    /// Reads a length prefix and its payload without looking at the first
    /// byte. Dictionary keys come through here, so a key that is not a byte
    /// string fails on its length rather than its leading byte.
    fn read_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let (digits, squeezed) = match self.scan_until(b':', MAX_LENGTH_DIGITS)? {
            Scan::Found { text, squeezed } => (text, squeezed),
            Scan::Eof => return Err(BencodeError::ReadLengthFailed),
            Scan::TooLong => return Err(BencodeError::InvalidLengthFormat),
        };

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(BencodeError::InvalidLengthFormat);
        }
        if self.config.strict && (squeezed || (digits.len() > 1 && digits[0] == b'0')) {
            return Err(BencodeError::NonCanonical("length prefix"));
        }

        let len: u64 = std::str::from_utf8(&digits)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(BencodeError::InvalidLengthFormat)?;

        // No up-front allocation of `len`: a forged prefix must not cost more
        // memory than the input actually supplies.
        let mut buf = Vec::new();
        (&mut self.reader)
            .take(len)
            .read_to_end(&mut buf)
            .map_err(BencodeError::Io)?;

        if buf.len() as u64 != len {
            return Err(BencodeError::ReadValueFailed);
        }

        Ok(Bytes::from(buf))
    }

    /// Decodes `l<value>*e`.
    pub fn decode_list(&mut self) -> Result<Vec<Value>, BencodeError> {
        self.expect_tag(b'l')?;

        self.nested(|this| {
            let mut list = Vec::new();
            loop {
                match this.peek()? {
                    None => return Err(BencodeError::InvalidEndingByte),
                    Some(b'e') => {
                        this.reader.consume(1);
                        return Ok(list);
                    }
                    Some(_) => list.push(this.decode_value()?),
                }
            }
        })
    }

    /// Decodes `d(<key><value>)*e`.
    ///
    /// A repeated key keeps its last value unless the decoder is strict, in
    /// which case keys must be strictly ascending.
    pub fn decode_dict(&mut self) -> Result<Dict, BencodeError> {
        self.expect_tag(b'd')?;

        self.nested(|this| {
            let mut dict = Dict::new();
            let mut last_key: Option<Bytes> = None;
            loop {
                match this.peek()? {
                    None => return Err(BencodeError::InvalidEndingByte),
                    Some(b'e') => {
                        this.reader.consume(1);
                        return Ok(dict);
                    }
                    Some(_) => {
                        let key = this.read_bytes()?;
                        if this.config.strict {
                            if last_key.as_ref().is_some_and(|last| *last >= key) {
                                return Err(BencodeError::NonCanonical("dictionary key order"));
                            }
                            last_key = Some(key.clone());
                        }
                        let value = this.decode_value()?;
                        dict.insert(key, value);
                    }
                }
            }
        })
    }

    fn decode_value(&mut self) -> Result<Value, BencodeError> {
        match self.peek()? {
            Some(b'i') => self.decode_integer().map(Value::Integer),
            Some(b'l') => self.decode_list().map(Value::List),
            Some(b'd') => self.decode_dict().map(Value::Dict),
            Some(b'0'..=b'9') => self.decode_bytes().map(Value::Bytes),
            _ => Err(BencodeError::InvalidLeadingByte),
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, BencodeError>,
    ) -> Result<T, BencodeError> {
        if self.depth >= self.config.max_depth {
            return Err(BencodeError::NestingTooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expect_tag(&mut self, tag: u8) -> Result<(), BencodeError> {
        if self.peek()? != Some(tag) {
            return Err(BencodeError::InvalidLeadingByte);
        }
        self.reader.consume(1);
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(BencodeError::Io(e)),
            }
        }
    }

    /// Consumes bytes up to and including `delim`, returning what came
    /// before it.
    ///
    /// At most `limit + 1` bytes are held at once. When the text outgrows
    /// that, redundant leading zeros are dropped; if that frees nothing the
    /// rest is consumed unbuffered until the delimiter or end of input.
    fn scan_until(&mut self, delim: u8, limit: usize) -> Result<Scan, BencodeError> {
        let mut text = Vec::new();
        let mut squeezed = false;
        let mut overflowed = false;
        loop {
            let (found, used) = {
                let buf = match self.reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(BencodeError::Io(e)),
                };
                if buf.is_empty() {
                    return Ok(Scan::Eof);
                }
                let (mut chunk, found) = match buf.iter().position(|&b| b == delim) {
                    Some(i) => (&buf[..i], true),
                    None => (buf, false),
                };
                let used = chunk.len() + usize::from(found);

                while !overflowed && !chunk.is_empty() {
                    let take = chunk.len().min(limit + 1 - text.len());
                    text.extend_from_slice(&chunk[..take]);
                    chunk = &chunk[take..];
                    if text.len() > limit {
                        squeezed |= squeeze_leading_zeros(&mut text);
                        if text.len() > limit {
                            overflowed = true;
                            text = Vec::new();
                        }
                    }
                }
                (found, used)
            };
            self.reader.consume(used);

            if found {
                return Ok(if overflowed {
                    Scan::TooLong
                } else {
                    Scan::Found { text, squeezed }
                });
            }
        }
    }
}

/// Drops zeros that follow the optional sign and precede another digit.
/// Returns whether anything was removed.
fn squeeze_leading_zeros(text: &mut Vec<u8>) -> bool {
    let start = usize::from(text.first() == Some(&b'-'));
    let digits = &text[start..];
    let zeros = digits.iter().take_while(|&&b| b == b'0').count();
    let redundant = zeros.min(digits.len().saturating_sub(1));
    text.drain(start..start + redundant);
    redundant > 0
}

fn is_canonical_integer(text: &[u8]) -> bool {
    let digits = text.strip_prefix(b"-").unwrap_or(text);
    match digits {
        [] => false,
        [b'0'] => text.len() == 1,
        [first, ..] => *first != b'0' && digits.iter().all(u8::is_ascii_digit),
    }
}

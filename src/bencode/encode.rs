use super::error::BencodeError;
use super::value::{Dict, Value};
use std::io::Write;

/// Encodes a value to canonical bencode.
///
/// Dictionary keys come out in ascending raw-byte order no matter how the
/// dictionary was built, so equal values always encode to equal bytes.
///
/// # Errors
///
/// Only fails if the in-memory buffer cannot be written, which `Vec<u8>`
/// never does; the `Result` mirrors [`encode_into`].
///
/// # Examples
///
/// ```
/// use bitmeta::bencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"b"), Value::string("valueB"));
/// dict.insert(Bytes::from_static(b"a"), Value::string("valueA"));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:a6:valueA1:b6:valueBe");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    encode_into(&mut buf, value)?;
    Ok(buf)
}

/// Streams the encoding of `value` into `writer`.
///
/// # Errors
///
/// [`BencodeError::WriteFailed`] if the writer rejects bytes. Partial output
/// may already have been written at that point.
pub fn encode_into<W: Write>(writer: W, value: &Value) -> Result<(), BencodeError> {
    Encoder::new(writer).encode(value)
}

/// Exact size of the canonical encoding of `value`.
pub fn encoded_len(value: &Value) -> usize {
    match value {
        Value::Integer(i) => 2 + usize::from(*i < 0) + digits(i.unsigned_abs()),
        Value::Bytes(b) => bytes_len(b.len()),
        Value::List(l) => 2 + l.iter().map(encoded_len).sum::<usize>(),
        Value::Dict(d) => {
            2 + d
                .iter()
                .map(|(k, v)| bytes_len(k.len()) + encoded_len(v))
                .sum::<usize>()
        }
    }
}

fn bytes_len(len: usize) -> usize {
    digits(len as u64) + 1 + len
}

fn digits(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Writes bencode to any [`Write`] sink.
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn encode(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Integer(i) => self.encode_integer(*i),
            Value::Bytes(b) => self.encode_bytes(b),
            Value::List(l) => self.encode_list(l),
            Value::Dict(d) => self.encode_dict(d),
        }
    }

    pub fn encode_integer(&mut self, i: i64) -> Result<(), BencodeError> {
        write!(self.writer, "i{}e", i)?;
        Ok(())
    }

    pub fn encode_bytes(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        write!(self.writer, "{}:", bytes.len())?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    pub fn encode_list(&mut self, list: &[Value]) -> Result<(), BencodeError> {
        self.writer.write_all(b"l")?;
        for item in list {
            self.encode(item)?;
        }
        self.writer.write_all(b"e")?;
        Ok(())
    }

    pub fn encode_dict(&mut self, dict: &Dict) -> Result<(), BencodeError> {
        self.writer.write_all(b"d")?;
        for (key, value) in dict {
            self.encode_bytes(key)?;
            self.encode(value)?;
        }
        self.writer.write_all(b"e")?;
        Ok(())
    }
}

use bytes::Bytes;
use std::collections::BTreeMap;

/// A dictionary as held in memory. Keys order by raw byte value, which is
/// exactly the order canonical bencode requires on the wire.
pub type Dict = BTreeMap<Bytes, Value>;

/// One of the four bencode primitives.
///
/// # Examples
///
/// ```
/// use bitmeta::bencode::Value;
///
/// let list = Value::List(vec![Value::Integer(7), Value::string("seven")]);
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
///
/// let int: Value = 42i64.into();
/// assert_eq!(int.as_integer(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A length-prefixed byte string. Not necessarily UTF-8.
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A mapping from byte-string keys to values.
    Dict(Dict),
}

impl Value {
    /// Builds a byte string from UTF-8 text.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the byte string as text.
    ///
    /// `None` when the value is not a byte string or is not valid UTF-8.
    ///
    /// ```
    /// use bitmeta::bencode::Value;
    ///
    /// assert_eq!(Value::string("tracker").as_str(), Some("tracker"));
    /// assert_eq!(Value::Bytes(vec![0xff, 0xfe].into()).as_str(), None);
    /// assert_eq!(Value::Integer(1).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Takes the dictionary out of the value without cloning it.
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a dictionary.
    ///
    /// ```
    /// use bitmeta::bencode::decode;
    ///
    /// let value = decode(b"d4:spami3ee").unwrap();
    /// assert_eq!(value.get(b"spam").and_then(|v| v.as_integer()), Some(3));
    /// assert!(value.get(b"eggs").is_none());
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

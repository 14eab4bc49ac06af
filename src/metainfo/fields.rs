use super::error::MetainfoError;
use crate::bencode::{Dict, Value};
use bytes::Bytes;

/// Borrowed views a [`Value`] can be narrowed to.
pub(super) trait FromValue<'a>: Sized {
    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for i64 {
    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_integer()
    }
}

impl<'a> FromValue<'a> for &'a Bytes {
    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_bytes()
    }
}

impl<'a> FromValue<'a> for &'a str {
    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromValue<'a> for &'a [Value] {
    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_list()
    }
}

impl<'a> FromValue<'a> for &'a Dict {
    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_dict()
    }
}

/// Typed key lookup over one dictionary.
#[derive(Clone, Copy)]
pub(super) struct Fields<'a> {
    dict: &'a Dict,
}

impl<'a> Fields<'a> {
    pub(super) fn new(dict: &'a Dict) -> Self {
        Self { dict }
    }

    /// The value under `key` if present and of type `T`.
    ///
    /// A present value of another type is treated as absent.
    pub(super) fn optional<T: FromValue<'a>>(&self, key: &str) -> Option<T> {
        let value = self.dict.get(key.as_bytes())?;
        let narrowed = T::from_value(value);
        if narrowed.is_none() {
            tracing::debug!("ignoring field {:?}: unexpected {}", key, value.kind());
        }
        narrowed
    }

    /// Like [`Fields::optional`], but absence or a type mismatch is
    /// reported as [`MetainfoError::MissingField`] named `field`.
    pub(super) fn required<T: FromValue<'a>>(
        &self,
        key: &str,
        field: &'static str,
    ) -> Result<T, MetainfoError> {
        self.dict
            .get(key.as_bytes())
            .and_then(T::from_value)
            .ok_or(MetainfoError::MissingField(field))
    }
}

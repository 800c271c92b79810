//! Conversion between domain objects and their JSON wire representation.
//!
//! Every public type of the API crates has a companion `*Data` structure that
//! mirrors its JSON document. [`Wire::wrap`] produces that structure from the
//! domain object and [`Wire::unwrap`] validates it back into the domain object.

use std::collections::BTreeMap;
use std::io;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

/// A type with a JSON wire representation.
pub trait Wire: Sized {
    /// Serde-facing mirror of the type.
    type Data: Serialize + DeserializeOwned;

    /// Converts the domain object into its wire form.
    fn wrap(&self) -> Self::Data;

    /// Converts a decoded wire form into the domain object.
    fn unwrap(data: Self::Data) -> Result<Self>;
}

macro_rules! impl_identity_wire {
    ($($t:ty),* $(,)?) => {
        $(
            impl Wire for $t {
                type Data = $t;

                fn wrap(&self) -> Self::Data {
                    Clone::clone(self)
                }

                fn unwrap(data: Self::Data) -> Result<Self> {
                    Ok(data)
                }
            }
        )*
    };
}

impl_identity_wire!(
    bool,
    i32,
    i64,
    String,
    DateTime<Utc>,
    BTreeMap<String, String>,
);

/// Wire form of `f64`. JSON has no representation for NaN or the infinities,
/// so serializing them fails instead of producing `null`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Float(pub f64);

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return Err(serde::ser::Error::custom(format!(
                "unsupported floating point value {}",
                self.0
            )));
        }
        serializer.serialize_f64(self.0)
    }
}

impl Wire for f64 {
    type Data = Float;

    fn wrap(&self) -> Self::Data {
        Float(*self)
    }

    fn unwrap(data: Self::Data) -> Result<Self> {
        Ok(data.0)
    }
}

impl<T: Wire> Wire for Vec<T> {
    type Data = Vec<T::Data>;

    fn wrap(&self) -> Self::Data {
        self.iter().map(Wire::wrap).collect()
    }

    fn unwrap(data: Self::Data) -> Result<Self> {
        data.into_iter().map(T::unwrap).collect()
    }
}

/// Serializes an object to a JSON string.
pub fn marshal<T: Wire>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(&value.wrap())?)
}

/// Serializes an object as JSON into the given writer.
pub fn marshal_to_writer<T: Wire, W: io::Write>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer(writer, &value.wrap())?;
    Ok(())
}

/// Decodes an object from a JSON document.
pub fn unmarshal<T: Wire>(source: impl AsRef<[u8]>) -> Result<T> {
    let data: T::Data = serde_json::from_slice(source.as_ref())?;
    T::unwrap(data)
}

/// Decodes an object from a reader producing a JSON document.
pub fn unmarshal_from_reader<T: Wire, R: io::Read>(reader: R) -> Result<T> {
    let data: T::Data = serde_json::from_reader(reader)?;
    T::unwrap(data)
}

/// Serializes a slice of objects as a JSON array.
pub fn marshal_list<T: Wire>(items: &[T]) -> Result<String> {
    let data: Vec<T::Data> = items.iter().map(Wire::wrap).collect();
    Ok(serde_json::to_string(&data)?)
}

/// Decodes a JSON array of objects.
pub fn unmarshal_list<T: Wire>(source: impl AsRef<[u8]>) -> Result<Vec<T>> {
    let data: Vec<T::Data> = serde_json::from_slice(source.as_ref())?;
    Vec::<T>::unwrap(data)
}

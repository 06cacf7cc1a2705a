//! Backend A: outcomes over `serde_json::Value` trees.
//!
//! [`JsonCodec`] writes field names through a [`NamingPolicy`], including
//! the `Code`/`Description`/`Data` names of each error. Payload contents keep
//! the names their own `Serialize` impls choose.
//!
//! # Examples
//!
//! ```
//! use presence::{ErrorInfo, Outcome};
//! use presence::codec::{NamingPolicy, json::{JsonCodec, JsonOptions}};
//! use serde_json::json;
//!
//! let codec = JsonCodec::new(JsonOptions::default().with_naming(NamingPolicy::CamelCase));
//! let failed: Outcome<u8> = Outcome::failed(ErrorInfo::new("X", "bad"));
//! assert_eq!(
//!     codec.to_value(&failed)?,
//!     json!({"isSuccess": false, "isCancelled": false,
//!            "errors": [{"code": "X", "description": "bad"}]}),
//! );
//! # Ok::<_, serde_json::Error>(())
//! ```

use std::{any::Any, borrow::Cow};

use serde::{
    Deserialize, Serialize,
    de::{self, DeserializeOwned, Unexpected},
};
use serde_json::{Map, Value, map::IntoIter};

use super::{NamingPolicy, TreeReader, TreeWriter, WritePolicy, read_outcome, write_outcome};
use crate::{ErrorInfo, Optional, Outcome, introspect::registry};

/// When default-valued fields are left out of the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DefaultIgnoreCondition {
    /// Always write every field.
    Never,
    /// Leave out fields holding their default value.
    #[default]
    WhenWritingDefault,
}

/// Options for [`JsonCodec`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Case convention for field names; canonical names when `None`.
    pub naming: Option<NamingPolicy>,
    /// Default-value handling.
    pub ignore: DefaultIgnoreCondition,
}

impl JsonOptions {
    /// Use `policy` for field names.
    #[must_use]
    pub const fn with_naming(mut self, policy: NamingPolicy) -> Self {
        self.naming = Some(policy);
        self
    }

    /// Replace the default-value handling.
    #[must_use]
    pub const fn with_ignore(mut self, ignore: DefaultIgnoreCondition) -> Self {
        self.ignore = ignore;
        self
    }
}

impl WritePolicy for JsonOptions {
    fn field_name<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        self.naming.map_or(Cow::Borrowed(canonical), |policy| {
            Cow::Owned(policy.convert(canonical))
        })
    }

    fn include_defaults(&self) -> bool {
        self.ignore == DefaultIgnoreCondition::Never
    }
}

/// Encoder and decoder for `serde_json` trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    options: JsonOptions,
}

impl JsonCodec {
    /// Codec using `options`.
    #[must_use]
    pub const fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &JsonOptions {
        &self.options
    }

    /// Encode an outcome as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the payload's serialization error.
    pub fn to_value<T>(&self, outcome: &Outcome<T>) -> Result<Value, serde_json::Error>
    where
        T: Serialize + Any,
    {
        write_outcome(outcome, JsonWriter::new(&self.options), &self.options)
    }

    /// Encode an outcome as JSON text.
    ///
    /// # Errors
    ///
    /// Returns the payload's serialization error.
    pub fn to_string<T>(&self, outcome: &Outcome<T>) -> Result<String, serde_json::Error>
    where
        T: Serialize + Any,
    {
        self.to_value(outcome).and_then(|value| serde_json::to_string(&value))
    }

    /// Decode an outcome from a JSON tree; `null` decodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error for anything other than an object or
    /// `null`, or for fields of the wrong type.
    pub fn from_value<T>(&self, value: Value) -> Result<Option<Outcome<T>>, serde_json::Error>
    where
        T: DeserializeOwned + Any,
    {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => read_outcome(JsonReader::new(map)).map(Some),
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"an outcome object",
            )),
        }
    }

    /// Decode an outcome from JSON text; `null` decodes to `None`.
    ///
    /// # Errors
    ///
    /// As [`JsonCodec::from_value`], plus malformed JSON.
    pub fn from_str<T>(&self, text: &str) -> Result<Option<Outcome<T>>, serde_json::Error>
    where
        T: DeserializeOwned + Any,
    {
        self.from_value(serde_json::from_str(text)?)
    }

    /// Encode a top-level optional; `Absent` becomes `null`.
    ///
    /// # Errors
    ///
    /// Returns the payload's serialization error.
    pub fn optional_to_value<T>(&self, optional: &Optional<T>) -> Result<Value, serde_json::Error>
    where
        T: Serialize + Any + Send,
    {
        let _shape = registry::optional::<T>();
        serde_json::to_value(optional)
    }

    /// Decode a top-level optional; `null` becomes `Absent`.
    ///
    /// # Errors
    ///
    /// Returns the payload's deserialization error.
    pub fn optional_from_value<T>(&self, value: Value) -> Result<Optional<T>, serde_json::Error>
    where
        T: DeserializeOwned + Any + Send,
    {
        let _shape = registry::optional::<T>();
        serde_json::from_value(value)
    }
}

struct JsonWriter<'p, P: ?Sized> {
    map: Map<String, Value>,
    policy: &'p P,
}

impl<'p, P: WritePolicy + ?Sized> JsonWriter<'p, P> {
    fn new(policy: &'p P) -> Self {
        Self {
            map: Map::new(),
            policy,
        }
    }

    fn rename_error_fields(&self, error: Value) -> Value {
        match error {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (self.policy.field_name(&key).into_owned(), value))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl<P: WritePolicy + ?Sized> TreeWriter for JsonWriter<'_, P> {
    type Ok = Value;
    type Error = serde_json::Error;

    fn write_flag(&mut self, name: &str, value: bool) -> Result<(), Self::Error> {
        self.map.insert(name.to_owned(), Value::Bool(value));
        Ok(())
    }

    fn write_errors(&mut self, name: &str, errors: &[ErrorInfo]) -> Result<(), Self::Error> {
        let encoded = errors
            .iter()
            .map(|error| serde_json::to_value(error).map(|value| self.rename_error_fields(value)))
            .collect::<Result<Vec<_>, _>>()?;
        self.map.insert(name.to_owned(), Value::Array(encoded));
        Ok(())
    }

    fn write_payload<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.map.insert(name.to_owned(), serde_json::to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Object(self.map))
    }
}

struct JsonReader {
    entries: IntoIter,
    pending: Option<Value>,
}

impl JsonReader {
    fn new(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter(),
            pending: None,
        }
    }

    fn take(&mut self) -> Value {
        self.pending.take().unwrap_or(Value::Null)
    }
}

impl TreeReader for JsonReader {
    type Error = serde_json::Error;

    fn next_key(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.next().map(|(key, value)| {
            self.pending = Some(value);
            key
        }))
    }

    fn read_flag(&mut self) -> Result<bool, Self::Error> {
        Option::<bool>::deserialize(self.take()).map(Option::unwrap_or_default)
    }

    fn read_errors(&mut self) -> Result<Option<Vec<ErrorInfo>>, Self::Error> {
        Option::<Vec<ErrorInfo>>::deserialize(self.take())
    }

    fn read_payload<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error> {
        T::deserialize(self.take())
    }

    fn skip_value(&mut self) -> Result<(), Self::Error> {
        self.pending = None;
        Ok(())
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(number) => number
            .as_f64()
            .map_or(Unexpected::Other("number"), Unexpected::Float),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

//! Backend B: outcomes over `figment::value::Value` trees.
//!
//! Encoded outcomes can be merged into a `Figment` as provider data and
//! extracted again. Field names, including those of each error, pass
//! through an optional naming hook. Figment dictionaries are ordered by key,
//! so the success flag is not guaranteed to come first.
//!
//! # Examples
//!
//! ```
//! use presence::Outcome;
//! use presence::codec::dict::{DictCodec, DictOptions};
//!
//! let codec = DictCodec::new(DictOptions::default().with_naming(|name| name.to_lowercase()));
//! let encoded = codec.to_value(&Outcome::succeeded(7_u32))?;
//! assert_eq!(encoded.find_ref("issuccess").and_then(|flag| flag.to_bool()), Some(true));
//! assert_eq!(codec.from_value::<u32>(encoded)?, Some(Outcome::succeeded(7)));
//! # Ok::<_, figment::Error>(())
//! ```

use std::{any::Any, borrow::Cow, collections::btree_map::IntoIter, fmt, sync::Arc};

use figment::value::{Dict, Tag, Value};
use serde::{
    Deserialize, Serialize,
    de::{self, DeserializeOwned, Unexpected},
};

use super::{TreeReader, TreeWriter, WritePolicy, read_outcome, write_outcome};
use crate::{ErrorInfo, Optional, Outcome, introspect::registry};

/// Naming hook applied to every written field name.
pub type NamingHook = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Whether default-valued fields are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DefaultValueHandling {
    /// Write every field.
    Include,
    /// Leave out fields holding their default value.
    #[default]
    Ignore,
}

/// Options for [`DictCodec`].
#[derive(Clone, Default)]
pub struct DictOptions {
    naming: Option<NamingHook>,
    defaults: DefaultValueHandling,
}

impl DictOptions {
    /// Rename every written field through `hook`.
    #[must_use]
    pub fn with_naming<F>(self, hook: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with_hook(Arc::new(hook))
    }

    /// Rename every written field through a shared hook.
    #[must_use]
    pub fn with_hook(mut self, hook: NamingHook) -> Self {
        self.naming = Some(hook);
        self
    }

    /// Replace the default-value handling.
    #[must_use]
    pub const fn with_default_handling(mut self, defaults: DefaultValueHandling) -> Self {
        self.defaults = defaults;
        self
    }

    /// Active default-value handling.
    #[must_use]
    pub const fn default_handling(&self) -> DefaultValueHandling {
        self.defaults
    }
}

impl fmt::Debug for DictOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictOptions")
            .field("naming", &self.naming.as_ref().map(|_| "<hook>"))
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl WritePolicy for DictOptions {
    fn field_name<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        self.naming
            .as_ref()
            .map_or(Cow::Borrowed(canonical), |hook| Cow::Owned(hook(canonical)))
    }

    fn include_defaults(&self) -> bool {
        self.defaults == DefaultValueHandling::Include
    }
}

/// Encoder and decoder for figment value trees.
#[derive(Clone, Debug, Default)]
pub struct DictCodec {
    options: DictOptions,
}

impl DictCodec {
    /// Codec using `options`.
    #[must_use]
    pub const fn new(options: DictOptions) -> Self {
        Self { options }
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &DictOptions {
        &self.options
    }

    /// Encode an outcome as a figment dictionary.
    ///
    /// # Errors
    ///
    /// Returns the payload's serialization error.
    pub fn to_value<T>(&self, outcome: &Outcome<T>) -> Result<Value, figment::Error>
    where
        T: Serialize + Any,
    {
        write_outcome(outcome, DictWriter::new(&self.options), &self.options)
    }

    /// Decode an outcome; an empty value decodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns a figment error for anything other than a dictionary or an
    /// empty value, or for fields of the wrong type.
    pub fn from_value<T>(&self, value: Value) -> Result<Option<Outcome<T>>, figment::Error>
    where
        T: DeserializeOwned + Any,
    {
        match value {
            Value::Empty(..) => Ok(None),
            Value::Dict(_, dict) => read_outcome(DictReader::new(dict)).map(Some),
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"an outcome dictionary",
            )),
        }
    }

    /// Encode a top-level optional; `Absent` becomes an empty value.
    ///
    /// # Errors
    ///
    /// Returns the payload's serialization error.
    pub fn optional_to_value<T>(&self, optional: &Optional<T>) -> Result<Value, figment::Error>
    where
        T: Serialize + Any + Send,
    {
        let _shape = registry::optional::<T>();
        Value::serialize(optional)
    }

    /// Decode a top-level optional; an empty value becomes `Absent`.
    ///
    /// # Errors
    ///
    /// Returns the payload's deserialization error.
    pub fn optional_from_value<T>(&self, value: &Value) -> Result<Optional<T>, figment::Error>
    where
        T: DeserializeOwned + Any + Send,
    {
        let _shape = registry::optional::<T>();
        value.deserialize()
    }
}

struct DictWriter<'p, P: ?Sized> {
    dict: Dict,
    policy: &'p P,
}

impl<'p, P: WritePolicy + ?Sized> DictWriter<'p, P> {
    fn new(policy: &'p P) -> Self {
        Self {
            dict: Dict::new(),
            policy,
        }
    }

    fn rename_error_fields(&self, error: Value) -> Value {
        match error {
            Value::Dict(tag, fields) => Value::Dict(
                tag,
                fields
                    .into_iter()
                    .map(|(key, value)| (self.policy.field_name(&key).into_owned(), value))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl<P: WritePolicy + ?Sized> TreeWriter for DictWriter<'_, P> {
    type Ok = Value;
    type Error = figment::Error;

    fn write_flag(&mut self, name: &str, value: bool) -> Result<(), Self::Error> {
        self.dict.insert(name.to_owned(), Value::Bool(Tag::Default, value));
        Ok(())
    }

    fn write_errors(&mut self, name: &str, errors: &[ErrorInfo]) -> Result<(), Self::Error> {
        let encoded = errors
            .iter()
            .map(|error| Value::serialize(error).map(|value| self.rename_error_fields(value)))
            .collect::<Result<Vec<_>, _>>()?;
        self.dict
            .insert(name.to_owned(), Value::Array(Tag::Default, encoded));
        Ok(())
    }

    fn write_payload<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.dict.insert(name.to_owned(), Value::serialize(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Dict(Tag::Default, self.dict))
    }
}

struct DictReader {
    entries: IntoIter<String, Value>,
    pending: Option<Value>,
}

impl DictReader {
    fn new(dict: Dict) -> Self {
        Self {
            entries: dict.into_iter(),
            pending: None,
        }
    }

    fn take<T: DeserializeOwned>(&mut self) -> Result<Option<T>, figment::Error> {
        self.pending
            .take()
            .map_or(Ok(None), |value| value.deserialize::<Option<T>>())
    }
}

impl TreeReader for DictReader {
    type Error = figment::Error;

    fn next_key(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.next().map(|(key, value)| {
            self.pending = Some(value);
            key
        }))
    }

    fn read_flag(&mut self) -> Result<bool, Self::Error> {
        self.take::<bool>().map(Option::unwrap_or_default)
    }

    fn read_errors(&mut self) -> Result<Option<Vec<ErrorInfo>>, Self::Error> {
        self.take()
    }

    fn read_payload<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error> {
        match self.pending.take() {
            Some(value) => value.deserialize(),
            None => Err(de::Error::missing_field(super::Field::Value.canonical())),
        }
    }

    fn skip_value(&mut self) -> Result<(), Self::Error> {
        self.pending = None;
        Ok(())
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::String(_, text) => Unexpected::Str(text),
        Value::Char(_, c) => Unexpected::Char(*c),
        Value::Bool(_, flag) => Unexpected::Bool(*flag),
        Value::Empty(..) => Unexpected::Unit,
        Value::Array(..) => Unexpected::Seq,
        Value::Dict(..) => Unexpected::Map,
        Value::Num(..) => Unexpected::Other("number"),
    }
}

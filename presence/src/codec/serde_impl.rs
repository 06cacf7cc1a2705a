//! `serde` impls for the value types, using canonical field names.

use std::{any::Any, collections::BTreeMap, fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::Value;

use super::{CanonicalPolicy, TreeReader, TreeWriter, field_count, read_outcome, write_outcome};
use crate::{ErrorInfo, Optional, Outcome};

const CODE: &str = "Code";
const DESCRIPTION: &str = "Description";
const DATA: &str = "Data";

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(OptionalVisitor(PhantomData))
    }
}

struct OptionalVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
    type Value = Optional<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional value")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Optional::Absent)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Optional::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        T::deserialize(deserializer).map(Optional::Present)
    }
}

impl<T: Serialize + Any> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = serializer.serialize_map(Some(field_count(self, &CanonicalPolicy)))?;
        write_outcome(self, MapWriter(map), &CanonicalPolicy)
    }
}

impl<'de, T: DeserializeOwned + Any> Deserialize<'de> for Outcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OutcomeVisitor(PhantomData))
    }
}

struct OutcomeVisitor<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned + Any> Visitor<'de> for OutcomeVisitor<T> {
    type Value = Outcome<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outcome object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        read_outcome(MapReader {
            access: map,
            marker: PhantomData,
        })
    }
}

struct MapWriter<M>(M);

impl<M: SerializeMap> TreeWriter for MapWriter<M> {
    type Ok = M::Ok;
    type Error = M::Error;

    fn write_flag(&mut self, name: &str, value: bool) -> Result<(), Self::Error> {
        self.0.serialize_entry(name, &value)
    }

    fn write_errors(&mut self, name: &str, errors: &[ErrorInfo]) -> Result<(), Self::Error> {
        self.0.serialize_entry(name, errors)
    }

    fn write_payload<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.0.serialize_entry(name, value)
    }

    fn finish(self) -> Result<Self::Ok, Self::Error> {
        self.0.end()
    }
}

struct MapReader<'de, A> {
    access: A,
    marker: PhantomData<&'de ()>,
}

impl<'de, A: MapAccess<'de>> TreeReader for MapReader<'de, A> {
    type Error = A::Error;

    fn next_key(&mut self) -> Result<Option<String>, Self::Error> {
        self.access.next_key()
    }

    fn read_flag(&mut self) -> Result<bool, Self::Error> {
        self.access
            .next_value::<Option<bool>>()
            .map(Option::unwrap_or_default)
    }

    fn read_errors(&mut self) -> Result<Option<Vec<ErrorInfo>>, Self::Error> {
        self.access.next_value()
    }

    fn read_payload<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error> {
        self.access.next_value()
    }

    fn skip_value(&mut self) -> Result<(), Self::Error> {
        self.access.next_value::<IgnoredAny>().map(|_| ())
    }
}

impl Serialize for ErrorInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.data().is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(CODE, self.code())?;
        map.serialize_entry(DESCRIPTION, self.description())?;
        if let Some(data) = self.data() {
            map.serialize_entry(DATA, data)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ErrorInfoVisitor)
    }
}

struct ErrorInfoVisitor;

impl<'de> Visitor<'de> for ErrorInfoVisitor {
    type Value = ErrorInfo;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error object with Code and Description")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut code = None;
        let mut description = None;
        let mut data = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.to_ascii_lowercase().as_str() {
                "code" => code = map.next_value::<Option<String>>()?,
                "description" => description = map.next_value::<Option<String>>()?,
                "data" => data = map.next_value::<Option<BTreeMap<String, Value>>>()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(ErrorInfo::from_parts(
            code.unwrap_or_default(),
            description.unwrap_or_default(),
            data,
        ))
    }
}

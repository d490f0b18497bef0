use std::time::Duration;

use phrasebones::Scheme;
use serde::{Deserialize, Deserializer, Serializer};

pub fn ser_scheme<S>(
  scheme: &Scheme,
  serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
  S: Serializer,
{
  serializer.serialize_str(scheme.as_str())
}

pub fn de_scheme<'de, D>(
  deserializer: D,
) -> std::result::Result<Scheme, D::Error>
where
  D: Deserializer<'de>,
{
  use serde::de;

  struct SchemeVisitor {}

  impl<'de> de::Visitor<'de> for SchemeVisitor {
    type Value = Scheme;

    fn expecting(
      &self,
      formatter: &mut std::fmt::Formatter,
    ) -> std::fmt::Result {
      write!(formatter, "one of \"scattered\" or \"deterministic\"")
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
      E: de::Error,
    {
      value
        .parse()
        .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
  }

  deserializer.deserialize_str(SchemeVisitor {})
}

pub fn ser_millis<S>(
  duration: &Duration,
  serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
  S: Serializer,
{
  use serde::ser;

  let millis = u64::try_from(duration.as_millis()).map_err(|_| {
    <S::Error as ser::Error>::custom("duration does not fit in milliseconds")
  })?;
  serializer.serialize_u64(millis)
}

pub fn de_millis<'de, D>(
  deserializer: D,
) -> std::result::Result<Duration, D::Error>
where
  D: Deserializer<'de>,
{
  u64::deserialize(deserializer).map(Duration::from_millis)
}

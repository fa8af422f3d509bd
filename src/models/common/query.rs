//! 查询参数反序列化辅助
//!
//! 与 `#[serde(flatten)]` 组合时，urlencoded 的值会以字符串形式到达，
//! 数字和布尔字段需要手动解析。空字符串视为未提供。

use serde::Deserializer;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    use serde::de::{Error, Visitor};

    struct OptionalVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for OptionalVisitor<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        type Value = Option<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a value or a string containing a value")
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse::<T>()
                .map(Some)
                .map_err(|e| Error::custom(format!("invalid value '{value}': {e}")))
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
            self.visit_str(if value { "true" } else { "false" })
        }
    }

    deserializer.deserialize_any(OptionalVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Inner {
        #[serde(default)]
        name: Option<String>,
    }

    #[derive(Deserialize)]
    struct Params {
        #[serde(flatten)]
        inner: Inner,
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        flag: Option<bool>,
    }

    #[test]
    fn test_flattened_query_values_are_parsed() {
        let params = Query::<Params>::from_query("name=Asha&year=2024&flag=true")
            .expect("parse")
            .into_inner();
        assert_eq!(params.inner.name.as_deref(), Some("Asha"));
        assert_eq!(params.year, Some(2024));
        assert_eq!(params.flag, Some(true));
    }

    #[test]
    fn test_missing_and_empty_values_are_none() {
        let params = Query::<Params>::from_query("year=")
            .expect("parse")
            .into_inner();
        assert_eq!(params.year, None);
        assert_eq!(params.flag, None);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        assert!(Query::<Params>::from_query("year=abc").is_err());
    }
}

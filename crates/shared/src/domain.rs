use serde::{Deserialize, Deserializer, Serialize};

/// A book as it travels between the view and the `bookapi` service.
///
/// Decoding is lenient: the service stores unset text columns as `NULL`, and
/// older deployments key books by a numeric id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub title: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub author: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub publisher: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub year: i32,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub genre: String,
}

impl BookRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

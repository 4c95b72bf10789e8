/// Wire shapes of the structured aka and release date entries.
///
/// These mirror the object form the service returns when the matching
/// verbosity is `full`.
use serde::{Deserialize, Deserializer};

/// One "also known as" entry: `{"country": "...", "title": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct AkaEntry {
    pub country: String,
    pub title: String,
}

/// One release date entry: `{"country": "...", "year": Y, "month": M, "day": D}`.
#[derive(Debug, Deserialize)]
pub(super) struct ReleaseEntry {
    pub country: String,
    #[serde(deserialize_with = "lenient_int")]
    pub year: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub month: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub day: i64,
}

/// Integer that may be sent as a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

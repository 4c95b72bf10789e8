//! Response envelopes
//!
//! An envelope separates a successful payload from a status-coded failure.
//! Whenever the status is an error the envelope carries no data.

use crate::status::ResponseStatus;
use serde_json::{Map, Value};

/// Key holding the status code.
const STATUS_CODE: &str = "code";
/// Key holding the result list of a title search.
const RESULT: &str = "result";
/// Key holding the total number of matches of a title search.
const TOTAL_RESULTS: &str = "total_found";

/// Reads the status of a parsed payload.
///
/// A missing `code` means success. Integer codes and numeric strings are
/// looked up in the catalog; any other value is an unknown error.
fn status_of(json: &Map<String, Value>) -> ResponseStatus {
    let Some(code) = json.get(STATUS_CODE) else {
        return ResponseStatus::None;
    };

    lenient_integer(code).map_or(ResponseStatus::UnknownError, ResponseStatus::from_code)
}

/// Integer carried as a JSON number or a numeric string.
fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_text(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, body_len = raw.len(), "Response is not valid JSON");
            None
        }
    }
}

/// Envelope around a single-object response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseObject {
    status: ResponseStatus,
    data: Option<Map<String, Value>>,
}

impl ResponseObject {
    /// Parses raw response text.
    ///
    /// Text that is not a JSON object yields an unknown-error envelope.
    pub fn parse(raw: &str) -> Self {
        match parse_text(raw) {
            Some(Value::Object(json)) => Self::from_json(json),
            Some(_) => {
                tracing::warn!("Expected a JSON object response");
                Self::from_status(ResponseStatus::UnknownError)
            }
            None => Self::from_status(ResponseStatus::UnknownError),
        }
    }

    /// Wraps an already parsed object.
    pub fn from_json(json: Map<String, Value>) -> Self {
        let status = status_of(&json);
        if status.is_error() {
            Self::from_status(status)
        } else {
            Self {
                status,
                data: Some(json),
            }
        }
    }

    /// Creates a failed envelope without data.
    pub fn from_status(status: ResponseStatus) -> Self {
        Self { status, data: None }
    }

    /// Status of the call.
    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    /// Whether the call failed.
    pub fn has_error(&self) -> bool {
        self.status.is_error()
    }

    /// The payload object, absent when the call failed.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Consumes the envelope, returning the payload or the failure status.
    pub fn into_result(self) -> Result<Map<String, Value>, ResponseStatus> {
        match self.data {
            Some(data) if !self.status.is_error() => Ok(data),
            _ => Err(self.status),
        }
    }
}

/// Envelope around a list response of a title search.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseArray {
    status: ResponseStatus,
    data: Option<Vec<Value>>,
    total: u64,
}

impl ResponseArray {
    /// Parses raw response text.
    ///
    /// Accepts `{"result": [...], "total_found": N}` as well as a bare JSON
    /// array. Without `total_found` the total is the number of elements.
    pub fn parse(raw: &str) -> Self {
        match parse_text(raw) {
            Some(Value::Object(json)) => Self::from_json(json),
            Some(Value::Array(items)) => Self::from_items(items, None),
            Some(_) => {
                tracing::warn!("Expected a JSON object or array response");
                Self::from_status(ResponseStatus::UnknownError)
            }
            None => Self::from_status(ResponseStatus::UnknownError),
        }
    }

    /// Wraps an already parsed object.
    pub fn from_json(mut json: Map<String, Value>) -> Self {
        let status = status_of(&json);
        if status.is_error() {
            return Self::from_status(status);
        }

        let total = json.get(TOTAL_RESULTS).and_then(|total| {
            let count = lenient_integer(total).and_then(|n| u64::try_from(n).ok());
            if count.is_none() {
                tracing::warn!(found = %total, "Ignoring unreadable result count");
            }
            count
        });
        let items = match json.remove(RESULT) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::warn!(found = %other, "Result field is not an array");
                Vec::new()
            }
            None => Vec::new(),
        };

        Self::from_items(items, total)
    }

    fn from_items(items: Vec<Value>, total: Option<u64>) -> Self {
        let total = total.unwrap_or(items.len() as u64);
        Self {
            status: ResponseStatus::None,
            data: Some(items),
            total,
        }
    }

    /// Creates a failed envelope without data.
    pub fn from_status(status: ResponseStatus) -> Self {
        Self {
            status,
            data: None,
            total: 0,
        }
    }

    /// Status of the call.
    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    /// Whether the call failed.
    pub fn has_error(&self) -> bool {
        self.status.is_error()
    }

    /// The result elements, absent when the call failed.
    pub fn data(&self) -> Option<&[Value]> {
        self.data.as_deref()
    }

    /// Total number of matches reported by the service.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Appends the elements of another page.
    pub(crate) fn extend(&mut self, items: Vec<Value>) {
        if let Some(data) = self.data.as_mut() {
            data.extend(items);
        }
    }

    /// Consumes the envelope, returning the elements or the failure status.
    pub fn into_result(self) -> Result<Vec<Value>, ResponseStatus> {
        match self.data {
            Some(data) if !self.status.is_error() => Ok(data),
            _ => Err(self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_without_code_is_success() {
        let response = ResponseObject::parse(r#"{"title":"Inception"}"#);
        assert!(!response.has_error());
        assert_eq!(response.status(), ResponseStatus::None);
        assert_eq!(response.data().unwrap()["title"], "Inception");
    }

    #[test]
    fn test_object_with_zero_code_keeps_data() {
        let response = ResponseObject::parse(r#"{"code":0,"title":"Inception"}"#);
        assert!(!response.has_error());
        assert!(response.data().is_some());
    }

    #[test]
    fn test_object_with_error_code_drops_data() {
        let response = ResponseObject::parse(r#"{"code":404,"error":"Film not found"}"#);
        assert!(response.has_error());
        assert_eq!(response.status(), ResponseStatus::MovieNotFound);
        assert!(response.data().is_none());
        assert_eq!(response.into_result(), Err(ResponseStatus::MovieNotFound));
    }

    #[test]
    fn test_code_as_string_and_unknown_code() {
        assert_eq!(
            ResponseObject::parse(r#"{"code":"501"}"#).status(),
            ResponseStatus::InvalidParameter
        );
        assert_eq!(
            ResponseObject::parse(r#"{"code":42}"#).status(),
            ResponseStatus::UnknownError
        );
        assert_eq!(
            ResponseObject::parse(r#"{"code":[1]}"#).status(),
            ResponseStatus::UnknownError
        );
    }

    #[test]
    fn test_invalid_text_is_unknown_error() {
        assert_eq!(
            ResponseObject::parse("<html>oops</html>").status(),
            ResponseStatus::UnknownError
        );
        assert_eq!(
            ResponseObject::parse("[1, 2]").status(),
            ResponseStatus::UnknownError
        );
        assert_eq!(
            ResponseArray::parse("").status(),
            ResponseStatus::UnknownError
        );
    }

    #[test]
    fn test_array_object_form() {
        let response =
            ResponseArray::parse(r#"{"total_found":12,"result":[{"title":"A"},{"title":"B"}]}"#);
        assert!(!response.has_error());
        assert_eq!(response.total(), 12);
        assert_eq!(response.data().unwrap().len(), 2);
    }

    #[test]
    fn test_array_total_as_string() {
        let response = ResponseArray::parse(r#"{"total_found":" 12","result":[{"title":"A"}]}"#);
        assert_eq!(response.total(), 12);

        let response = ResponseArray::parse(r#"{"total_found":"many","result":[{"title":"A"}]}"#);
        assert_eq!(response.total(), 1);
    }

    #[test]
    fn test_array_bare_form() {
        let response = ResponseArray::parse(r#"[{"title":"A"},{"title":"B"},{"title":"C"}]"#);
        assert_eq!(response.total(), 3);
        assert_eq!(response.data().unwrap().len(), 3);
    }

    #[test]
    fn test_array_error() {
        let response = ResponseArray::parse(r#"{"code":99}"#);
        assert_eq!(response.status(), ResponseStatus::Timeout);
        assert!(response.data().is_none());
        assert_eq!(response.total(), 0);
    }

    #[test]
    fn test_array_extend() {
        let mut response = ResponseArray::parse(r#"{"total_found":2,"result":[{"title":"A"}]}"#);
        response.extend(vec![serde_json::json!({"title": "B"})]);
        assert_eq!(response.into_result().unwrap().len(), 2);
    }
}

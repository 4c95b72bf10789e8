//! Response status catalog
//!
//! The remote service reports failures through a numeric `code` field. This
//! module maps those codes onto a closed set of statuses, each carrying the
//! human readable message shown to users.

use std::fmt;

/// Known response statuses of the movie metadata service.
///
/// Transport level failures (timeouts, malformed URLs) are folded into the
/// same catalog so every layer can treat them as ordinary status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseStatus {
    /// Code 0: no error
    #[default]
    None,
    /// Code 404: the requested movie does not exist
    MovieNotFound,
    /// Code 501: one of the query parameters was rejected
    InvalidParameter,
    /// Code 98: the query URL could not be constructed
    MalformedUrl,
    /// Code 99: the request timed out
    Timeout,
    /// Code 100: anything else
    UnknownError,
}

impl ResponseStatus {
    /// All catalog entries, in declaration order.
    pub const ALL: [ResponseStatus; 6] = [
        ResponseStatus::None,
        ResponseStatus::MovieNotFound,
        ResponseStatus::InvalidParameter,
        ResponseStatus::MalformedUrl,
        ResponseStatus::Timeout,
        ResponseStatus::UnknownError,
    ];

    /// Returns the numeric wire code of this status.
    pub const fn code(self) -> i64 {
        match self {
            ResponseStatus::None => 0,
            ResponseStatus::MovieNotFound => 404,
            ResponseStatus::InvalidParameter => 501,
            ResponseStatus::MalformedUrl => 98,
            ResponseStatus::Timeout => 99,
            ResponseStatus::UnknownError => 100,
        }
    }

    /// Returns the human readable message of this status.
    pub const fn message(self) -> &'static str {
        match self {
            ResponseStatus::None => "None.",
            ResponseStatus::MovieNotFound => "Film not found.",
            ResponseStatus::InvalidParameter => "Parameter was invalid.",
            ResponseStatus::MalformedUrl => "Malformed url.",
            ResponseStatus::Timeout => "Request Timeout. Retry in a few minutes.",
            ResponseStatus::UnknownError => "Unknown error. See the log for more information.",
        }
    }

    /// Looks up the status for a wire code.
    ///
    /// Codes outside the catalog, including negative ones, resolve to
    /// [`ResponseStatus::UnknownError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use imdbapi_client::ResponseStatus;
    ///
    /// assert_eq!(ResponseStatus::from_code(404), ResponseStatus::MovieNotFound);
    /// assert_eq!(ResponseStatus::from_code(7), ResponseStatus::UnknownError);
    /// ```
    pub fn from_code(code: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .unwrap_or(ResponseStatus::UnknownError)
    }

    /// Whether this status denotes a failed call.
    pub const fn is_error(self) -> bool {
        self.code() != ResponseStatus::None.code()
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

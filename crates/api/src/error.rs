use hyper::{
    header::InvalidHeaderValue,
    http::{self, uri::InvalidUri},
    StatusCode,
};
use serde_json::error::Category;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// The configured base URL or a derived path is not a valid URI.
    Uri(InvalidUri),
    /// A resource identifier contains characters that cannot be placed in a path.
    InvalidId,
    /// The bearer token contains bytes that cannot appear in a header.
    Header(InvalidHeaderValue),
    /// Failed to assemble the request itself.
    Http(http::Error),
    /// Connection-level failure before any response arrived.
    Connect(hyper_util::client::legacy::Error),
    /// Failed to read the response body.
    Body(hyper::Error),
    /// JSON syntax error detected.
    Syntax(serde_json::Error),
    /// Unexpected JSON data types encountered.
    Data(serde_json::Error),
    /// The server answered with a non-success status.
    Status { status: StatusCode, message: Box<str> },
}

impl From<InvalidUri> for Error {
    fn from(err: InvalidUri) -> Self {
        Self::Uri(err)
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(err: InvalidHeaderValue) -> Self {
        Self::Header(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::Connect(err)
    }
}

impl From<hyper::Error> for Error {
    fn from(err: hyper::Error) -> Self {
        Self::Body(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Data(err),
            _ => Self::Syntax(err),
        }
    }
}

impl Error {
    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(err) => write!(f, "Invalid URL: {err}."),
            Self::InvalidId => f.write_str("Invalid quiz identifier."),
            Self::Header(_) => f.write_str("The access token cannot be sent as a header."),
            Self::Http(err) => write!(f, "Malformed request: {err}."),
            Self::Connect(_) => f.write_str("Could not reach the server."),
            Self::Body(_) => f.write_str("The server response was cut short."),
            Self::Syntax(_) => f.write_str("Syntax error in JSON detected."),
            Self::Data(_) => f.write_str("Unexpected data types in JSON detected."),
            Self::Status { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Uri(err) => Some(err),
            Self::Header(err) => Some(err),
            Self::Http(err) => Some(err),
            Self::Connect(err) => Some(err),
            Self::Body(err) => Some(err),
            Self::Syntax(err) | Self::Data(err) => Some(err),
            Self::InvalidId | Self::Status { .. } => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

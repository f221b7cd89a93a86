use crate::{gate::Requirement, import::ImportError, step::Step, Stage};
use core::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// The active step's gate does not pass yet.
    Blocked(Requirement),
    /// The edit belongs to a step other than the active one.
    NotActive(Step),
    /// The requested navigation does not exist from the current stage.
    InvalidTransition(Stage),
    /// The question document could not be imported.
    Import(ImportError),
    /// A category needs a name before it can be created.
    EmptyName,
    /// The platform rejected or failed the request.
    Api(api::error::Error),
}

impl From<Requirement> for Error {
    fn from(req: Requirement) -> Self {
        Self::Blocked(req)
    }
}

impl From<ImportError> for Error {
    fn from(err: ImportError) -> Self {
        Self::Import(err)
    }
}

impl From<api::error::Error> for Error {
    fn from(err: api::error::Error) -> Self {
        Self::Api(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked(req) => req.fmt(f),
            Self::NotActive(step) => write!(f, "Those settings belong to step {} ({}).", step.number(), step.title()),
            Self::InvalidTransition(stage) => write!(f, "That action is not available while {stage}."),
            Self::Import(err) => err.fmt(f),
            Self::EmptyName => f.write_str("Category name cannot be empty."),
            Self::Api(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

use crate::edit::ImportEdit;
use core::fmt::{self, Display};
use model::{quiz::QuestionError, Question};
use serde::Deserialize;

#[derive(Debug)]
pub enum ImportError {
    /// The document is not a question list.
    Malformed(serde_json::Error),
    /// The document contains no questions at all.
    Empty,
    /// The question at this zero-based position is unusable.
    Question { index: usize, error: QuestionError },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(_) => f.write_str("Expected a JSON list of questions."),
            Self::Empty => f.write_str("The document does not contain any questions."),
            Self::Question { index, error } => write!(f, "Question {}: {error}", index + 1),
        }
    }
}

/// Accepted layouts: a bare list, or an object with a `questions` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

/// Parses and validates a question document, producing the edit that loads it
/// into the import step.
pub fn parse(source: &str, text: &str) -> Result<ImportEdit, ImportError> {
    let questions = match serde_json::from_str(text).map_err(ImportError::Malformed)? {
        Document::List(questions) | Document::Wrapped { questions } => questions,
    };

    if questions.is_empty() {
        return Err(ImportError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        question.validate().map_err(|error| ImportError::Question { index, error })?;
    }

    log::debug!("Parsed {} questions from {source}.", questions.len());
    Ok(ImportEdit::Load { source: source.into(), questions })
}

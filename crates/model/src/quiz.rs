use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of choices a single question may carry.
pub const MAX_CHOICES: usize = 25;

/// Acceptable schema for imported questions.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Prompt shown to the quiz taker.
    pub question: String,
    /// Possible answers to select from.
    pub choices: Vec<String>,
    /// Index of the choice with the correct answer.
    pub answer: u8,
}

#[derive(Debug, PartialEq, Eq)]
pub enum QuestionError {
    EmptyPrompt,
    EmptyChoice,
    ChoiceCount,
    AnswerOutOfRange,
}

impl Display for QuestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyPrompt => "The question prompt is empty.",
            Self::EmptyChoice => "One of the choices is empty.",
            Self::ChoiceCount => "A question must have between 1 and 25 choices.",
            Self::AnswerOutOfRange => "The answer does not point to any of the choices.",
        })
    }
}

impl Question {
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let count = self.choices.len();
        if !(1..=MAX_CHOICES).contains(&count) {
            return Err(QuestionError::ChoiceCount);
        }

        if self.choices.iter().any(|choice| choice.trim().is_empty()) {
            return Err(QuestionError::EmptyChoice);
        }

        if usize::from(self.answer) >= count {
            return Err(QuestionError::AnswerOutOfRange);
        }

        Ok(())
    }
}

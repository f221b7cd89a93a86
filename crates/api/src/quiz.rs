use crate::{
    error::{Error, Result},
    Client,
};
use hyper::Method;
use model::{BasicPatch, QuizPayload};
use serde_json::Value;

const QUIZZES: &str = "/api/admin/quizzes";

/// Outcome of a successful quiz creation.
#[derive(Debug, PartialEq, Eq)]
pub struct Created {
    /// Identifier assigned by the server, when it reports one.
    pub id: Option<Box<str>>,
    /// Confirmation text to show the user.
    pub message: Box<str>,
}

fn quiz_path(id: &str) -> Result<String> {
    let valid = !id.is_empty() && id.bytes().all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_'));
    if valid {
        Ok(format!("{QUIZZES}/{id}"))
    } else {
        Err(Error::InvalidId)
    }
}

/// Finds the document inside the common `{ "quiz": ... }` and `{ "data": ... }` envelopes.
fn unwrap_document(mut value: Value) -> Value {
    let key = ["quiz", "data"].into_iter().find(|key| value.get(key).is_some_and(Value::is_object));
    match key {
        Some(key) => value[key].take(),
        None => value,
    }
}

fn parse_created(bytes: &[u8]) -> Created {
    const DEFAULT_MESSAGE: &str = "Quiz created successfully.";
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return Created { id: None, message: DEFAULT_MESSAGE.into() };
    };

    let message = value.get("message").and_then(Value::as_str).unwrap_or(DEFAULT_MESSAGE).into();
    let doc = unwrap_document(value);
    let id = ["_id", "id"].into_iter().find_map(|key| doc.get(key).and_then(Value::as_str)).map(Box::from);
    Created { id, message }
}

impl Client {
    /// Issues the single create call for a fully assembled draft.
    pub async fn create_quiz(&self, payload: &QuizPayload) -> Result<Created> {
        let bytes = self.send_json(Method::POST, QUIZZES, payload).await?;
        let created = parse_created(&bytes);
        log::info!("Created quiz {:?}.", created.id);
        Ok(created)
    }

    pub async fn get_basic(&self, id: &str) -> Result<BasicPatch> {
        let value: Value = self.get(&quiz_path(id)?).await?;
        Ok(serde_json::from_value(unwrap_document(value))?)
    }

    pub async fn update_basic(&self, id: &str, patch: &BasicPatch) -> Result<()> {
        self.send_json(Method::PUT, &quiz_path(id)?, patch).await?;
        Ok(())
    }
}

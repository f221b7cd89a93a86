use crate::{edit::BasicEdit, error::Result, gate};
use api::{error::Error as ApiError, Autosave, Client};
use core::time::Duration;
use model::{BasicPatch, BasicSettings};

/// Editor for the basic settings of a quiz that already exists on the server.
/// Changes bypass the wizard entirely: each one is written back through the
/// debounced [`Autosave`] worker.
pub struct BasicEditor {
    id: Box<str>,
    settings: BasicSettings,
    autosave: Autosave,
}

impl BasicEditor {
    /// Fetches the current values and starts autosaving. Save failures are
    /// reported through `on_error` and never retried.
    pub async fn open<F>(client: Client, id: &str, delay: Duration, on_error: F) -> Result<Self>
    where
        F: FnMut(ApiError) + Send + 'static,
    {
        let patch = client.get_basic(id).await?;
        log::info!("Editing basic settings of quiz {id}.");
        let id: Box<str> = id.into();
        let autosave = Autosave::spawn(client, id.clone(), delay, on_error);
        Ok(Self { id, settings: patch.into(), autosave })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &BasicSettings {
        &self.settings
    }

    /// Whether the current values would pass the basic settings gate.
    pub fn is_complete(&self) -> bool {
        gate::check_basic(&self.settings).is_ok()
    }

    pub fn apply(&mut self, edit: BasicEdit) {
        edit.apply(&mut self.settings);
        if !self.autosave.push(BasicPatch::from(&self.settings)) {
            log::warn!("Autosave worker for quiz {} has stopped.", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BasicEditor;
    use crate::edit::BasicEdit;
    use api::Client;
    use core::time::Duration;
    use serde_json::{json, Value};
    use tokio::time;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const DELAY: Duration = Duration::from_millis(200);

    async fn server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/quizzes/q1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "q1",
                "title": "Physics",
                "description": "Mechanics",
                "duration": 45,
                "totalMarks": 20,
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/quizzes/q1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        server
    }

    async fn puts(server: &MockServer) -> Vec<Value> {
        server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|req| req.method.as_str() == "PUT")
            .map(|req| req.body_json().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn loads_current_values() {
        let server = server().await;
        let client = Client::new(&server.uri(), None).unwrap();
        let editor = BasicEditor::open(client, "q1", DELAY, |_| {}).await.unwrap();
        assert_eq!(editor.id(), "q1");
        assert_eq!(editor.settings().title, "Physics");
        assert_eq!(editor.settings().duration_minutes, "45");
        assert!(editor.is_complete());
        assert!(puts(&server).await.is_empty());
    }

    #[tokio::test]
    async fn title_edit_saves_once_after_quiet_period() {
        let server = server().await;
        let client = Client::new(&server.uri(), None).unwrap();
        let mut editor = BasicEditor::open(client, "q1", DELAY, |_| {}).await.unwrap();

        editor.apply(BasicEdit::Title("Physics II".into()));
        time::sleep(DELAY * 3).await;

        let saved = puts(&server).await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0]["title"], json!("Physics II"));
        assert_eq!(saved[0]["duration"], json!(45));
    }

    #[tokio::test]
    async fn typing_coalesces_into_one_save() {
        let server = server().await;
        let client = Client::new(&server.uri(), None).unwrap();
        let mut editor = BasicEditor::open(client, "q1", DELAY, |_| {}).await.unwrap();

        for title in ["P", "Ph", "Phy"] {
            editor.apply(BasicEdit::Title(title.into()));
        }
        time::sleep(DELAY * 3).await;

        let saved = puts(&server).await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0]["title"], json!("Phy"));
    }

    #[tokio::test]
    async fn missing_quiz_fails_to_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Quiz not found" })))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let err = BasicEditor::open(client, "q404", DELAY, |_| {}).await.err().unwrap();
        assert_eq!(err.to_string(), "Quiz not found");
    }
}

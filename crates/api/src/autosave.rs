use crate::{error::Error, Client};
use core::time::Duration;
use model::BasicPatch;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};

/// Quiet period after the last edit before the settings are written back.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// Debounced writer of an existing quiz's basic settings.
///
/// Every [`push`](Self::push) restarts the quiet period; only the newest
/// settings are sent once it elapses. Saves run one at a time on a single
/// worker, so responses can never land out of order. Dropping the handle
/// discards whatever is still pending.
pub struct Autosave {
    tx: mpsc::UnboundedSender<BasicPatch>,
    worker: JoinHandle<()>,
}

impl Autosave {
    pub fn spawn<F>(client: Client, id: Box<str>, delay: Duration, on_error: F) -> Self
    where
        F: FnMut(Error) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(client, id, delay, rx, on_error));
        Self { tx, worker }
    }

    /// Schedules the given settings for saving. Returns `false` if the worker
    /// is no longer running.
    pub fn push(&self, patch: BasicPatch) -> bool {
        self.tx.send(patch).is_ok()
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run<F>(client: Client, id: Box<str>, delay: Duration, mut rx: mpsc::UnboundedReceiver<BasicPatch>, mut on_error: F)
where
    F: FnMut(Error),
{
    let mut pending = None;
    let mut sleep = core::pin::pin!(time::sleep(delay));
    loop {
        tokio::select! {
            biased;
            msg = rx.recv() => {
                let Some(patch) = msg else { break };
                pending = Some(patch);
                sleep.as_mut().reset(Instant::now() + delay);
            }
            _ = &mut sleep, if pending.is_some() => {
                let Some(patch) = pending.take() else { continue };
                match client.update_basic(&id, &patch).await {
                    Ok(()) => log::debug!("Autosaved basic settings of quiz {id}."),
                    Err(err) => {
                        log::error!("Autosave of quiz {id} failed: {err}");
                        on_error(err);
                    }
                }
            }
        }
    }

    if pending.is_some() {
        log::debug!("Discarding unsaved settings of quiz {id}.");
    }
}

#[cfg(test)]
mod tests {
    use super::Autosave;
    use crate::Client;
    use core::time::Duration;
    use model::BasicPatch;
    use serde_json::Value;
    use tokio::{sync::mpsc, time};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const DELAY: Duration = Duration::from_millis(200);

    fn titled(title: &str) -> BasicPatch {
        BasicPatch { title: title.into(), duration: 30, total_marks: 10, ..Default::default() }
    }

    async fn server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/quizzes/q1"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }

    async fn saved_titles(server: &MockServer) -> Vec<String> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|req| req.body_json::<Value>().unwrap()["title"].as_str().unwrap().to_owned())
            .collect()
    }

    fn ignore_errors(_: crate::error::Error) {}

    #[tokio::test]
    async fn single_edit_saves_once() {
        let server = server(200).await;
        let client = Client::new(&server.uri(), None).unwrap();
        let autosave = Autosave::spawn(client, "q1".into(), DELAY, ignore_errors);

        assert!(autosave.push(titled("Q")));
        time::sleep(DELAY * 3).await;
        assert_eq!(saved_titles(&server).await, ["Q"]);
    }

    #[tokio::test]
    async fn rapid_edits_coalesce() {
        let server = server(200).await;
        let client = Client::new(&server.uri(), None).unwrap();
        let autosave = Autosave::spawn(client, "q1".into(), DELAY, ignore_errors);

        for title in ["Q", "Qu", "Qui"] {
            autosave.push(titled(title));
            time::sleep(DELAY / 4).await;
        }
        time::sleep(DELAY * 3).await;
        assert_eq!(saved_titles(&server).await, ["Qui"]);
    }

    #[tokio::test]
    async fn separate_bursts_save_in_order() {
        let server = server(200).await;
        let client = Client::new(&server.uri(), None).unwrap();
        let autosave = Autosave::spawn(client, "q1".into(), DELAY, ignore_errors);

        autosave.push(titled("First"));
        time::sleep(DELAY * 3).await;
        autosave.push(titled("Second"));
        time::sleep(DELAY * 3).await;
        assert_eq!(saved_titles(&server).await, ["First", "Second"]);
    }

    #[tokio::test]
    async fn dropping_discards_pending_save() {
        let server = server(200).await;
        let client = Client::new(&server.uri(), None).unwrap();
        let autosave = Autosave::spawn(client, "q1".into(), DELAY, ignore_errors);

        autosave.push(titled("Q"));
        drop(autosave);
        time::sleep(DELAY * 3).await;
        assert!(saved_titles(&server).await.is_empty());
    }

    #[tokio::test]
    async fn failures_reach_callback() {
        let server = server(500).await;
        let client = Client::new(&server.uri(), None).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let autosave = Autosave::spawn(client, "q1".into(), DELAY, move |err| {
            let _ = tx.send(err.status());
        });

        autosave.push(titled("Q"));
        let status = time::timeout(DELAY * 10, rx.recv()).await.unwrap().unwrap();
        assert_eq!(status.map(|status| status.as_u16()), Some(500));

        // No retry after a failure.
        time::sleep(DELAY * 3).await;
        assert_eq!(saved_titles(&server).await.len(), 1);
    }
}

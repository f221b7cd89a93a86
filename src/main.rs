mod console;

use core::time::Duration;
use std::env;
use tokio::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let url = env::var("API_URL")?;
    let token = env::var("API_TOKEN").ok();
    let delay = match env::var("AUTOSAVE_DELAY_MS") {
        Ok(millis) => Duration::from_millis(millis.parse()?),
        _ => api::AUTOSAVE_DELAY,
    };

    let client = api::Client::new(&url, token.as_deref())?;
    log::info!("Using quiz platform at {}.", client.base());

    let mut args = env::args().skip(1);
    let (command, id) = (args.next(), args.next());
    let runtime = Runtime::new()?;
    match (command.as_deref(), id) {
        (None, _) => runtime.block_on(console::run_wizard(client)),
        (Some("edit"), Some(id)) => runtime.block_on(console::run_editor(client, &id, delay)),
        _ => anyhow::bail!("usage: quizdesk [edit <quiz-id>]"),
    }
}

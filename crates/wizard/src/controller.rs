use crate::{
    category::CategoryPicker,
    edit::{CategoryEdit, Edit, ImportEdit},
    error::{Error, Result},
    import,
    summary::Summary,
    Stage, Step, Wizard,
};
use api::{Client, Created};

/// Callbacks into whatever opened the wizard.
pub struct Hooks {
    /// Runs after the quiz has been created, before `on_close`.
    pub on_success: Box<dyn FnMut(&Created) + Send>,
    pub on_close: Box<dyn FnMut() + Send>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self { on_success: Box::new(|_| {}), on_close: Box::new(|| {}) }
    }
}

impl Hooks {
    pub fn new<S, C>(on_success: S, on_close: C) -> Self
    where
        S: FnMut(&Created) + Send + 'static,
        C: FnMut() + Send + 'static,
    {
        Self { on_success: Box::new(on_success), on_close: Box::new(on_close) }
    }
}

/// Drives a [`Wizard`] against the platform: loads categories, creates new
/// ones, and issues the final create call.
pub struct Controller {
    wizard: Wizard,
    client: Client,
    categories: CategoryPicker,
    hooks: Hooks,
    status: Option<Box<str>>,
}

impl Controller {
    /// A fresh wizard at step 1. Performs no requests.
    pub fn new(client: Client, hooks: Hooks) -> Self {
        Self { wizard: Wizard::new(), client, categories: CategoryPicker::default(), hooks, status: None }
    }

    /// Opens the wizard and fetches the category list.
    pub async fn open(client: Client, hooks: Hooks) -> Self {
        let mut this = Self::new(client, hooks);
        this.categories.load(&this.client).await;
        log::info!("Quiz wizard opened.");
        this
    }

    pub const fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub const fn categories(&self) -> &CategoryPicker {
        &self.categories
    }

    /// The latest transient message, such as a submission outcome.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.wizard.stage()
    }

    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        self.wizard.apply(edit)
    }

    /// Parses a question document and loads it into the import step.
    pub fn import(&mut self, source: &str, text: &str) -> Result<usize> {
        let edit = import::parse(source, text)?;
        let count = match &edit {
            ImportEdit::Load { questions, .. } => questions.len(),
            ImportEdit::Clear => 0,
        };
        self.wizard.apply(edit.into())?;
        log::debug!("Imported {count} questions from {source}.");
        Ok(count)
    }

    pub async fn reload_categories(&mut self) {
        self.categories.load(&self.client).await;
    }

    /// Creates a category and selects it in one go.
    pub async fn create_category(&mut self, name: &str, description: &str) -> Result<()> {
        if self.wizard.stage() != Stage::Editing(Step::Category) {
            return Err(Error::InvalidTransition(self.wizard.stage()));
        }
        let id = self.categories.create(&self.client, name, description).await?.id.clone();
        self.wizard.apply(CategoryEdit::Select(id).into())
    }

    pub fn next(&mut self) -> Result<Stage> {
        let stage = self.wizard.next()?;
        self.status = None;
        Ok(stage)
    }

    pub fn back(&mut self) -> Result<Stage> {
        let stage = self.wizard.back()?;
        self.status = None;
        if stage == Stage::Closed {
            self.close();
        }
        Ok(stage)
    }

    pub fn edit_details(&mut self) -> Result<Stage> {
        self.wizard.edit_details()
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.wizard.cancel()?;
        self.close();
        Ok(())
    }

    fn close(&mut self) {
        log::info!("Quiz wizard closed.");
        (self.hooks.on_close)();
    }

    /// Submits the confirmed draft. A failure leaves the wizard at the summary
    /// so the same draft may be submitted again.
    pub async fn confirm(&mut self) -> Result<Created> {
        let payload = self.wizard.begin_submit()?;
        match self.client.create_quiz(&payload).await {
            Ok(created) => {
                self.wizard.finish_submit(true)?;
                self.status = Some(created.message.clone());
                (self.hooks.on_success)(&created);
                self.close();
                Ok(created)
            }
            Err(err) => {
                self.wizard.finish_submit(false)?;
                log::error!("Failed to create quiz: {err}");
                self.status = Some(format!("Failed to create quiz: {err}").into_boxed_str());
                Err(err.into())
            }
        }
    }

    pub fn summary(&self) -> Summary<'_> {
        let name = self.categories.find(&self.wizard.draft().category).map(|category| category.name.as_str());
        self.wizard.summary(name)
    }
}

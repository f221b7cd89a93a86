use crate::error::{Error, Result};
use api::Client;
use model::Category;

/// Local state of the category step: the fetched list plus anything created
/// from within the wizard.
#[derive(Debug, Default)]
pub struct CategoryPicker {
    categories: Vec<Category>,
    status: Option<Box<str>>,
}

impl CategoryPicker {
    /// Shown while no category has been chosen yet.
    pub const INFO: &'static str = "Select an existing category or create a new one to continue.";

    /// Replaces the local list with the server's. Failures are logged and kept
    /// as a status line; the previous list stays usable.
    pub async fn load(&mut self, client: &Client) {
        match client.list_categories().await {
            Ok(categories) => {
                log::debug!("Loaded {} categories.", categories.len());
                self.categories = categories;
                self.status = None;
            }
            Err(err) => {
                log::error!("Failed to fetch categories: {err}");
                self.status = Some(format!("Could not load categories: {err}").into_boxed_str());
            }
        }
    }

    /// Creates a category on the server and appends it to the local list.
    pub async fn create(&mut self, client: &Client, name: &str, description: &str) -> Result<&Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let category = match client.create_category(name, description.trim()).await {
            Ok(category) => category,
            Err(err) => {
                log::error!("Failed to create category {name:?}: {err}");
                self.status = Some(format!("Could not create category: {err}").into_boxed_str());
                return Err(err.into());
            }
        };

        log::info!("Created category {} ({}).", category.name, category.id);
        self.status = Some(format!("Category \"{}\" created.", category.name).into_boxed_str());
        self.categories.push(category);
        Ok(&self.categories[self.categories.len() - 1])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

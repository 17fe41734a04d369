//! Template catalog: the list served by `GET /templates`, revealed in pages.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use canvas::session::{Template, TemplateId};
use tracing::{error, info};

use crate::api::RenderService;

/// Templates revealed per page.
pub const LOAD_STEP: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    revealed: usize,
    unreachable: bool,
}

impl TemplateCatalog {
    /// Catalog over `templates` with nothing revealed yet.
    #[must_use]
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates, revealed: 0, unreachable: false }
    }

    /// Empty catalog for a service that could not be reached.
    #[must_use]
    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Self::default() }
    }

    /// Fetch the catalog. Failure is logged and yields an unreachable catalog.
    pub async fn load(service: &dyn RenderService) -> Self {
        match service.templates().await {
            Ok(templates) => {
                info!(count = templates.len(), "templates loaded");
                Self::from_templates(templates)
            }
            Err(e) => {
                error!(error = %e, "template fetch failed; is the backend running?");
                Self::unreachable()
            }
        }
    }

    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.unreachable
    }

    /// Templates revealed so far, in service order.
    #[must_use]
    pub fn revealed(&self) -> &[Template] {
        &self.templates[..self.revealed]
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.revealed < self.templates.len()
    }

    /// Reveal up to [`LOAD_STEP`] more templates and return just those.
    pub fn next_batch(&mut self) -> &[Template] {
        let start = self.revealed;
        self.revealed = (start + LOAD_STEP).min(self.templates.len());
        &self.templates[start..self.revealed]
    }

    /// Case-insensitive name search over the whole catalog.
    ///
    /// The query is matched as typed, surrounding spaces included. A blank
    /// query collapses paging back to the first batch and returns it.
    pub fn filter(&mut self, query: &str) -> Vec<&Template> {
        if query.trim().is_empty() {
            self.revealed = 0;
            return self.next_batch().iter().collect();
        }
        let query = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect()
    }

    #[must_use]
    pub fn find(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| &t.id == id)
    }
}

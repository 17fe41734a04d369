//! Application shell: ties the editor, the template catalog and the job
//! poller together behind the collaborator entry points.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::Editor;
use canvas::session::{Template, TemplateId};
use canvas::submission::GlobalOptions;
use tracing::info;

use crate::api::RenderService;
use crate::error::AppError;
use crate::poller::{JobPoller, JobState, JobUpdates};
use crate::templates::TemplateCatalog;

pub struct App {
    editor: Editor,
    service: Arc<dyn RenderService>,
    catalog: TemplateCatalog,
    poller: JobPoller,
    job: JobState,
    updates: Option<JobUpdates>,
}

impl App {
    #[must_use]
    pub fn new(editor: Editor, service: Arc<dyn RenderService>, poll_interval: Duration) -> Self {
        let poller = JobPoller::new(Arc::clone(&service), poll_interval);
        Self {
            editor,
            service,
            catalog: TemplateCatalog::default(),
            poller,
            job: JobState::Idle,
            updates: None,
        }
    }

    // --- Templates ---

    /// Fetch the catalog, reveal its first page and select the first template.
    ///
    /// Returns the selected template, or `None` if the catalog is empty or
    /// the service was unreachable.
    pub async fn load_templates(&mut self) -> Option<&Template> {
        self.catalog = TemplateCatalog::load(self.service.as_ref()).await;
        let first = self.catalog.next_batch().first().cloned()?;
        self.editor.on_template_selected(first);
        self.editor.session().map(canvas::session::EditorSession::template)
    }

    /// Select a template by id. Ids the catalog does not know are passed
    /// through unchanged with an empty name and image url.
    ///
    /// Returns whether the id was found in the catalog.
    pub fn select_template(&mut self, id: &TemplateId) -> bool {
        let (template, known) = match self.catalog.find(id) {
            Some(template) => (template.clone(), true),
            None => (Template { id: id.clone(), name: String::new(), url: String::new() }, false),
        };
        self.on_template_selected(template);
        known
    }

    /// Start a new editing session on `template`.
    pub fn on_template_selected(&mut self, template: Template) {
        info!(template_id = %template.id, name = %template.name, "template selected");
        self.editor.on_template_selected(template);
    }

    // --- Jobs ---

    /// Build the submission and start a render job, superseding any job in
    /// flight. Progress arrives through [`App::next_job_update`].
    ///
    /// # Errors
    ///
    /// Returns the editor's precondition error if no template is selected or
    /// the image has not loaded; no job is started then.
    pub fn on_submit_requested(&mut self, options: GlobalOptions) -> Result<(), AppError> {
        let payload = self.editor.build_submission(&options)?;
        info!(
            template_id = %payload.template_id,
            layers = payload.text_lines.len(),
            superseding = self.poller.is_active(),
            "submit requested"
        );
        self.updates = Some(self.poller.submit(payload));
        self.job = JobState::Idle;
        Ok(())
    }

    /// Wait for the current job's next transition. `None` once it has
    /// finished or when there is no job.
    pub async fn next_job_update(&mut self) -> Option<&JobState> {
        let updates = self.updates.as_mut()?;
        match updates.next().await {
            Some(state) => {
                self.job = state;
                Some(&self.job)
            }
            None => {
                self.updates = None;
                None
            }
        }
    }

    /// Close the result view, stopping the poll loop. The backend job is
    /// unaffected. Returns whether a loop was still running.
    pub fn close_result(&mut self) -> bool {
        self.updates = None;
        let stopped = self.poller.cancel();
        if stopped {
            info!("result closed, polling stopped");
        }
        if !self.job.is_terminal() {
            self.job = JobState::Idle;
        }
        stopped
    }

    // --- Accessors ---

    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }
}

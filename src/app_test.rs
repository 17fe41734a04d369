use std::sync::Mutex;

use canvas::EditorError;
use canvas::geom::Rect;
use canvas::submission::SubmissionPayload;
use canvas::transform::ImageGeometry;
use canvas::view::HeadlessSurface;

use super::*;
use crate::api::{ApiError, JobStatus, JobStatusResponse, TaskId};

// =============================================================================
// HELPERS
// =============================================================================

/// Accepts every submission as `job-N`; finishes after `pending_polls` pending answers.
struct Service {
    templates: Option<Vec<Template>>,
    pending_polls: usize,
    submitted: Mutex<Vec<SubmissionPayload>>,
    polls: Mutex<usize>,
}

impl Service {
    fn new(templates: Option<Vec<Template>>, pending_polls: usize) -> Arc<Self> {
        Arc::new(Self { templates, pending_polls, submitted: Mutex::default(), polls: Mutex::default() })
    }
}

#[async_trait::async_trait]
impl RenderService for Service {
    async fn templates(&self) -> Result<Vec<Template>, ApiError> {
        self.templates
            .clone()
            .ok_or_else(|| ApiError::Request("connection refused".into()))
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<TaskId, ApiError> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(payload.clone());
        Ok(TaskId(format!("job-{}", submitted.len())))
    }

    async fn job_status(&self, _task_id: &TaskId) -> Result<JobStatusResponse, ApiError> {
        let mut polls = self.polls.lock().unwrap();
        *polls += 1;
        if *polls > self.pending_polls {
            Ok(JobStatusResponse { status: JobStatus::Done, url: Some("http://img/out.png".into()) })
        } else {
            Ok(JobStatusResponse { status: JobStatus::Pending, url: None })
        }
    }
}

fn template(n: i64) -> Template {
    Template { id: TemplateId::Number(n), name: format!("meme {n}"), url: format!("http://img/{n}.png") }
}

/// Image drawn at the container origin at half its natural size.
fn loaded_surface() -> HeadlessSurface {
    let surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    surface.set_image(ImageGeometry::new(Rect::new(0.0, 0.0, 500.0, 400.0), 1000.0, 800.0));
    surface
}

fn app(surface: &HeadlessSurface, service: &Arc<Service>) -> App {
    let service: Arc<dyn RenderService> = service.clone();
    App::new(Editor::new(Box::new(surface.clone())), service, Duration::from_secs(1))
}

async fn run_to_end(app: &mut App) -> Vec<JobState> {
    let mut seen = Vec::new();
    while let Some(state) = app.next_job_update().await {
        seen.push(state.clone());
    }
    seen
}

// =============================================================================
// TEMPLATES
// =============================================================================

#[tokio::test]
async fn load_selects_first_template() {
    let service = Service::new(Some((1..=20).map(template).collect()), 0);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);

    let selected = app.load_templates().await.map(|t| t.id.clone());
    assert_eq!(selected, Some(TemplateId::Number(1)));
    assert_eq!(app.catalog().revealed().len(), 15);
    assert!(app.catalog().has_more());
    assert_eq!(surface.element_count(), 1);
}

#[tokio::test]
async fn unreachable_service_leaves_editor_empty() {
    let service = Service::new(None, 0);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);

    assert!(app.load_templates().await.is_none());
    assert!(app.catalog().is_unreachable());
    assert!(app.editor().session().is_none());
}

#[tokio::test]
async fn select_template_by_id() {
    let service = Service::new(Some(vec![template(1), template(2)]), 0);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);
    app.load_templates().await;

    assert!(app.select_template(&TemplateId::Number(2)));
    let session = app.editor().session().unwrap();
    assert_eq!(session.template().name, "meme 2");

    assert!(!app.select_template(&TemplateId::from("custom")));
    let session = app.editor().session().unwrap();
    assert_eq!(session.template().id, TemplateId::from("custom"));
    assert_eq!(session.layers.len(), 1);
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[tokio::test]
async fn submit_without_template_is_rejected() {
    let service = Service::new(Some(Vec::new()), 0);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);

    let err = app.on_submit_requested(GlobalOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::Editor(EditorError::NoTemplate)));
    assert!(!app.poller.is_active());
    assert!(app.next_job_update().await.is_none());
}

#[tokio::test]
async fn submit_before_image_loads_is_rejected() {
    let service = Service::new(Some(vec![template(1)]), 0);
    let surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    let mut app = app(&surface, &service);
    app.load_templates().await;

    let err = app.on_submit_requested(GlobalOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::Editor(EditorError::ImageNotLoaded)));
    assert!(service.submitted.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn submit_runs_job_to_completion() {
    let service = Service::new(Some(vec![template(7)]), 2);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);
    app.load_templates().await;

    app.on_submit_requested(GlobalOptions { border_enabled: false }).unwrap();
    let seen = run_to_end(&mut app).await;

    assert_eq!(seen.first(), Some(&JobState::Submitting));
    assert_eq!(
        seen.last(),
        Some(&JobState::Completed { task_id: TaskId::from("job-1"), url: Some("http://img/out.png".into()) })
    );
    assert_eq!(app.job.describe(), "Done!");
    assert!(!app.poller.is_active());

    let submitted = service.submitted.lock().unwrap();
    let payload = &submitted[0];
    assert_eq!(payload.template_id, TemplateId::Number(7));
    assert!(!payload.text_border);
    let line = &payload.text_lines[0];
    assert_eq!(line.text, "YOUR TEXT");
    assert_eq!((line.x_pos, line.y_pos, line.size), (40, 40, 80));
}

#[tokio::test(start_paused = true)]
async fn close_result_stops_polling() {
    let service = Service::new(Some(vec![template(1)]), usize::MAX);
    let surface = loaded_surface();
    let mut app = app(&surface, &service);
    app.load_templates().await;

    app.on_submit_requested(GlobalOptions::default()).unwrap();
    app.next_job_update().await;
    app.next_job_update().await;
    assert!(app.poller.is_active());
    assert_eq!(app.job.describe(), "Processing...");

    assert!(app.close_result());
    assert!(!app.poller.is_active());
    assert_eq!(&app.job, &JobState::Idle);
    assert!(app.next_job_update().await.is_none());

    let polls = *service.polls.lock().unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(*service.polls.lock().unwrap(), polls);
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use canvas::Editor;
use canvas::session::Template;
use canvas::submission::SubmissionPayload;

use super::*;
use crate::api::{ApiError, JobStatus, JobStatusResponse, RenderService, TaskId};

// =============================================================================
// HELPERS
// =============================================================================

/// One template; every job is done on its first poll.
#[derive(Default)]
struct Service {
    submitted: Mutex<Vec<SubmissionPayload>>,
}

#[async_trait::async_trait]
impl RenderService for Service {
    async fn templates(&self) -> Result<Vec<Template>, ApiError> {
        Ok(vec![Template { id: TemplateId::Number(1), name: "Drake".into(), url: "http://img/1.png".into() }])
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<TaskId, ApiError> {
        self.submitted.lock().unwrap().push(payload.clone());
        Ok(TaskId::from("job-1"))
    }

    async fn job_status(&self, _task_id: &TaskId) -> Result<JobStatusResponse, ApiError> {
        Ok(JobStatusResponse { status: JobStatus::Done, url: Some("http://img/out.png".into()) })
    }
}

async fn run(script: &str) -> (Result<(), AppError>, String, Arc<Service>) {
    let service = Arc::new(Service::default());
    let surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    let dyn_service: Arc<dyn RenderService> = service.clone();
    let mut app = App::new(Editor::new(Box::new(surface.clone())), dyn_service, Duration::from_secs(1));
    app.load_templates().await;

    let mut out = Vec::new();
    let result = run_script(&mut app, &surface, script.as_bytes(), &mut out).await;
    (result, String::from_utf8(out).unwrap(), service)
}

const LAYOUT: &str =
    r#"{"op":"layout","container":{"x":0,"y":0,"width":500,"height":400},"natural_width":1000,"natural_height":800}"#;

// =============================================================================
// REPLAY
// =============================================================================

#[tokio::test(start_paused = true)]
async fn drag_and_submit_transcript() {
    let script = format!(
        "{LAYOUT}
{{\"op\":\"add_layer\",\"text\":\"BOTTOM\"}}
{{\"op\":\"update\",\"field\":\"size\",\"value\":60}}
{{\"op\":\"pointer_down\",\"x\":30,\"y\":30}}
{{\"op\":\"pointer_move\",\"x\":130,\"y\":230}}
{{\"op\":\"pointer_up\"}}
{{\"op\":\"submit\"}}
"
    );
    let (result, out, service) = run(&script).await;
    result.unwrap();

    assert_eq!(
        out.lines().collect::<Vec<_>>(),
        vec![
            "layer 1 added",
            "drag layer 1",
            "moved to (120, 220)",
            "Processing...",
            "task job-1",
            "Done! http://img/out.png",
        ]
    );

    let submitted = service.submitted.lock().unwrap();
    let lines = &submitted[0].text_lines;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "YOUR TEXT");
    assert_eq!(lines[1].text, "BOTTOM");
    assert_eq!((lines[1].x_pos, lines[1].y_pos, lines[1].size), (240, 440, 96));
}

#[tokio::test]
async fn comments_and_blank_lines_are_skipped() {
    let script = format!("# setup\n\n   \n{LAYOUT}\n# done\n");
    let (result, out, _) = run(&script).await;
    result.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn editor_errors_are_reported_and_the_run_continues() {
    let script = r##"{"op":"activate","index":5}
{"op":"update","field":"color","value":"blue"}
{"op":"submit"}
{"op":"delete_active"}
{"op":"delete_active"}
{"op":"pointer_down","x":499,"y":399}
"##;
    let (result, out, service) = run(script).await;
    result.unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "error: no layer at index 5");
    assert!(lines[1].starts_with("error: invalid layer update: color"));
    assert_eq!(lines[2], "blocked: image not loaded yet");
    assert_eq!(lines[3], "nothing to delete");
    assert_eq!(lines[4], "no layer at (499, 399)");
    assert!(service.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn add_layer_without_template_is_blocked() {
    let service = Arc::new(Service::default());
    let surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    let dyn_service: Arc<dyn RenderService> = service.clone();
    let mut app = App::new(Editor::new(Box::new(surface.clone())), dyn_service, Duration::from_secs(1));

    let mut out = Vec::new();
    let script = "{\"op\":\"add_layer\"}\n{\"op\":\"submit\"}\n";
    run_script(&mut app, &surface, script.as_bytes(), &mut out).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap().lines().collect::<Vec<_>>(),
        vec!["blocked: no template selected", "blocked: no template selected"]
    );
}

#[tokio::test]
async fn malformed_line_stops_with_its_number() {
    let script = format!("{LAYOUT}\n{{\"op\":\"teleport\"}}\n{{\"op\":\"add_layer\"}}\n");
    let (result, out, _) = run(&script).await;
    let Err(AppError::Script { line, .. }) = result else {
        panic!("expected script error, got {result:?}");
    };
    assert_eq!(line, 2);
    assert!(out.is_empty());
}

#[tokio::test]
async fn unknown_template_is_passed_through() {
    let (result, out, _) = run(r#"{"op":"select_template","id":"custom-9"}"#).await;
    result.unwrap();
    assert_eq!(out.trim(), "template custom-9 (not in catalog)");
}

// =============================================================================
// OP PARSING
// =============================================================================

#[test]
fn ops_parse_from_json() {
    let op: ScriptOp = serde_json::from_str(r#"{"op":"select_template","id":7}"#).unwrap();
    assert_eq!(op, ScriptOp::SelectTemplate { id: TemplateId::Number(7) });

    let op: ScriptOp = serde_json::from_str(r#"{"op":"add_layer"}"#).unwrap();
    assert_eq!(op, ScriptOp::AddLayer { text: None });

    let op: ScriptOp = serde_json::from_str(r#"{"op":"update","field":"opacity","value":"40"}"#).unwrap();
    assert_eq!(op, ScriptOp::Update { field: "opacity".into(), value: serde_json::json!("40") });

    let op: ScriptOp = serde_json::from_str(r#"{"op":"close_result"}"#).unwrap();
    assert_eq!(op, ScriptOp::CloseResult);
}

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::state::AppState;

/// Python features refused even in the mock runner, so pasted solutions stay
/// focused on the algorithm.
const DANGEROUS_KEYWORDS: &[&str] = &[
    "import os",
    "import subprocess",
    "exec(",
    "eval(",
    "open(",
    "__import__",
];

#[derive(Debug, Deserialize)]
pub struct CodeRunRequest {
    pub code: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CodeRunResponse {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/code/run", post(run_code))
}

/// Mock code execution: no interpreter runs, the endpoint only returns canned
/// guidance. Real execution is a client-side concern.
#[instrument(skip(_user, body))]
pub async fn run_code(CurrentUser(_user): CurrentUser, Json(body): Json<CodeRunRequest>) -> Json<CodeRunResponse> {
    for kw in DANGEROUS_KEYWORDS {
        if body.code.contains(kw) {
            return Json(CodeRunResponse {
                success: false,
                output: String::new(),
                error: Some(format!(
                    "Security Error: '{kw}' is not allowed in this environment."
                )),
                explanation: Some(
                    "For safety, some Python features are restricted. Focus on the algorithm!"
                        .into(),
                ),
            });
        }
    }

    if body.code.contains("print(") {
        return Json(CodeRunResponse {
            success: true,
            output: "Code executed! (Output simulation in demo mode)\n\nTip: Use the 'Submit' \
                     button to validate your solution against test cases."
                .into(),
            error: None,
            explanation: Some(
                "In demo mode, we show guidance instead of actual execution.".into(),
            ),
        });
    }

    Json(CodeRunResponse {
        success: true,
        output: "No output. Add print() statements to see results.".into(),
        error: None,
        explanation: None,
    })
}

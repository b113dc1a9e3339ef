//! Assertions for `application/problem+json` error responses.
//!
//! Works on the raw wire shape, without backend types, so a test sees the
//! error exactly as an HTTP client would.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

/// Expected shape of one problem document.
pub struct ExpectedProblem<'a> {
    pub status: StatusCode,
    pub code: &'a str,
    pub detail_contains: Option<&'a str>,
}

/// Check status, content type, every required field, and that the body's
/// `trace_id` echoes the `x-trace-id` header.
pub async fn assert_problem(resp: ServiceResponse<BoxBody>, expected: ExpectedProblem<'_>) {
    assert_eq!(resp.status(), expected.status);

    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(
        header("content-type").as_deref(),
        Some("application/problem+json")
    );
    let trace_header = header("x-trace-id").expect("x-trace-id header missing");

    let body = actix_web::test::read_body(resp).await;
    let problem: Value = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("not a problem document ({e}): {body:?}"));

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(problem.get(key).is_some(), "problem document lacks '{key}'");
    }
    assert_eq!(problem["status"], expected.status.as_u16());
    assert_eq!(problem["code"], expected.code);
    assert_eq!(problem["trace_id"], trace_header.as_str());
    assert!(problem["type"]
        .as_str()
        .is_some_and(|t| t.ends_with(expected.code)));

    if let Some(fragment) = expected.detail_contains {
        let detail = problem["detail"].as_str().unwrap_or_default();
        assert!(
            detail.contains(fragment),
            "detail '{detail}' does not mention '{fragment}'"
        );
    }
}

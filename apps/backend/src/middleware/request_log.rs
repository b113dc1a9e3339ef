//! Per-request id, tracing span and completion log.
//!
//! Each request gets a fresh UUID. It is stored in a task-local so error
//! responses can echo it, attached to a `request` span so handler logs carry
//! it, and returned in the `x-request-id` header.

use std::cell::RefCell;
use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use tokio::task_local;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

task_local! {
    static REQUEST_ID: RefCell<Option<String>>;
}

/// Id of the request being handled, or "unknown" outside a request.
pub fn request_id() -> String {
    REQUEST_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn with_request_id<F, R>(id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_ID.scope(RefCell::new(Some(id)), future).await
}

#[derive(Clone, Default)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        let fut = self.service.call(req);
        let id = request_id.clone();

        Box::pin(
            with_request_id(id, async move {
                let result = fut.await;

                let status = match &result {
                    Ok(res) => res.status(),
                    Err(err) => err.as_response_error().status_code(),
                };
                let duration_us = start.elapsed().as_micros() as u64;
                let status_code = status.as_u16();

                if status.is_server_error() {
                    error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                } else if status.is_client_error() {
                    warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                } else {
                    info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                }

                let mut res = result?;
                res.headers_mut().insert(
                    HeaderName::from_static("x-request-id"),
                    HeaderValue::from_str(&request_id)
                        .unwrap_or_else(|_| HeaderValue::from_static("invalid-uuid")),
                );
                Ok(res)
            })
            .instrument(span),
        )
    }
}

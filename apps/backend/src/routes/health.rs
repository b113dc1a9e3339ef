use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .insert_header(("x-active-rooms", app_state.hub.active_rooms().to_string()))
        .body("ok"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}

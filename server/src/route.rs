mod book;

pub use self::book::*;

use crate::handler::AppModule;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub trait HealthRouter {
    fn route_health(self) -> Self;
}

impl HealthRouter for Router<AppModule> {
    fn route_health(self) -> Self {
        self.route(
            "/health",
            get(|| async { Json(json!({ "message": "hello world" })) }),
        )
    }
}

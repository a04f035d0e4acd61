//! Success response shape shared by every JSON endpoint:
//! `{ "success": true, "message"?, "count"?, "data" }`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn ok(self) -> HttpResponse {
        self.respond(StatusCode::OK)
    }

    pub fn created(self) -> HttpResponse {
        self.respond(StatusCode::CREATED)
    }

    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Collection response; `count` is the number of items returned.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            count: Some(count),
            ..Self::new(items)
        }
    }
}

/// `data: {}` for operations with nothing to return.
pub fn empty_data() -> serde_json::Value {
    serde_json::json!({})
}

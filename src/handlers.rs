// src/handlers.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::{
    models::notification::Notification,
    screens::{Outcome, Transition},
};

pub mod auth;
pub mod reports;
pub mod templates;
pub mod users;

// Corpo comum das telas: o estado resultante e os avisos que o cliente exibe
#[derive(Debug, Serialize)]
pub struct ScreenResponse<T> {
    pub data: T,
    pub notifications: Vec<Notification>,
    pub outcome: Outcome,
}

pub fn screen_response<T: Serialize>(transition: Transition<T>, success: StatusCode) -> impl IntoResponse {
    let status = match transition.outcome {
        Outcome::Applied => success,
        Outcome::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        Outcome::RemoteFailed => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ScreenResponse {
            data: transition.state,
            notifications: transition.notifications,
            outcome: transition.outcome,
        }),
    )
}

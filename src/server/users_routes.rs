//! User HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::responses::{
    bad_body, error_response, internal_error, message_response, parse_id,
};
use super::state::ServerState;
use crate::user::{UserError, UserInput, UserManager};

const USER_NOT_FOUND: &str = "User not found";

fn user_error_response(context: &str, err: UserError) -> Response {
    match err {
        UserError::Validation(message) => error_response(StatusCode::BAD_REQUEST, &message),
        err @ UserError::AlreadyExists => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        UserError::Store(err) => internal_error(context, err),
    }
}

async fn list_users(State(user_manager): State<UserManager>) -> Response {
    match user_manager.list_users() {
        Ok(users) if users.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(users) => Json(users).into_response(),
        Err(err) => user_error_response("Failed to list users", err),
    }
}

async fn get_user(State(user_manager): State<UserManager>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND);
    };
    match user_manager.get_user(id) {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND),
        Err(err) => user_error_response("Failed to get user", err),
    }
}

async fn create_user(
    State(user_manager): State<UserManager>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    match user_manager.create_user(&input) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => user_error_response("Failed to create user", err),
    }
}

async fn update_user(
    State(user_manager): State<UserManager>,
    Path(id): Path<String>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND);
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    match user_manager.update_user(id, &input) {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND),
        Err(err) => user_error_response("Failed to update user", err),
    }
}

async fn delete_user(State(user_manager): State<UserManager>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND);
    };
    match user_manager.delete_user(id) {
        Ok(true) => message_response("User deleted successfully"),
        Ok(false) => error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND),
        Err(err) => user_error_response("Failed to delete user", err),
    }
}

pub fn users_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

//! Handlers for feedback routes.

use serde_json::{Value, json};
use tracing::info;

use super::helpers::{data_response, err_response, json_response, service_error_response};
use crate::core::models::ApiRequest;
use crate::repository::FeedbackRepository;
use crate::repository::feedback::MISSING_ID_ERROR;
use crate::store::KeyValueStore;

fn body_value(request: &ApiRequest) -> Value {
    request.body.clone().map_or(Value::Null, Value::String)
}

fn path_id(request: &ApiRequest) -> Option<&str> {
    request.id.as_deref().filter(|id| !id.is_empty())
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn create_feedback<S: KeyValueStore>(repo: &FeedbackRepository<S>, request: &ApiRequest) -> Value {
    match repo.create(&body_value(request)).await {
        Ok(record) => data_response(201, "Successfully added feedback.", &record),
        Err(e) => service_error_response(&e, 400),
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn list_feedback<S: KeyValueStore>(repo: &FeedbackRepository<S>) -> Value {
    match repo.list().await {
        Ok(items) => {
            info!(count = items.len(), "Listed feedback");
            json_response(200, &items)
        }
        Err(e) => err_response(400, &e.to_string()),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn get_feedback<S: KeyValueStore>(repo: &FeedbackRepository<S>, request: &ApiRequest) -> Value {
    let Some(id) = path_id(request) else {
        return err_response(400, MISSING_ID_ERROR);
    };

    match repo.get_by_id(id).await {
        Ok(Some(record)) => json_response(200, &record),
        Ok(None) => err_response(404, "Post not found"),
        Err(e) => service_error_response(&e, 500),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn update_feedback<S: KeyValueStore>(repo: &FeedbackRepository<S>, request: &ApiRequest) -> Value {
    match repo.update_by_id(request).await {
        Ok(record) => data_response(200, "Successfully updated feedback.", &record),
        Err(e) => service_error_response(&e, 400),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn delete_feedback<S: KeyValueStore>(repo: &FeedbackRepository<S>, request: &ApiRequest) -> Value {
    let Some(id) = path_id(request) else {
        return err_response(400, MISSING_ID_ERROR);
    };

    match repo.delete_by_id(id).await {
        Ok(id) => json_response(200, &json!({ "id": id })),
        Err(e) => service_error_response(&e, 500),
    }
}

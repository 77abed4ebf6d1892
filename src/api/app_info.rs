//! Handlers for app-info routes.

use serde_json::{Value, json};
use tracing::info;

use super::helpers::{data_response, err_response, json_response, service_error_response};
use crate::core::models::ApiRequest;
use crate::repository::AppInfoRepository;
use crate::repository::app_info::MISSING_ID_ERROR;
use crate::store::KeyValueStore;

fn body_value(request: &ApiRequest) -> Value {
    request.body.clone().map_or(Value::Null, Value::String)
}

fn path_id(request: &ApiRequest) -> Option<&str> {
    request.id.as_deref().filter(|id| !id.is_empty())
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn create_app_info<S: KeyValueStore>(repo: &AppInfoRepository<S>, request: &ApiRequest) -> Value {
    match repo.create(&body_value(request)).await {
        Ok(record) => data_response(201, "AppInfo created successfully", &record),
        Err(e) => service_error_response(&e, 400),
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn list_app_info<S: KeyValueStore>(repo: &AppInfoRepository<S>) -> Value {
    match repo.list().await {
        Ok(records) => {
            info!(count = records.len(), "Listed app info");
            json_response(200, &records)
        }
        Err(e) => service_error_response(&e, 500),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn get_app_info<S: KeyValueStore>(repo: &AppInfoRepository<S>, request: &ApiRequest) -> Value {
    let Some(id) = path_id(request) else {
        return err_response(400, MISSING_ID_ERROR);
    };

    match repo.get_by_id(id).await {
        Ok(record) => json_response(200, &record),
        Err(e) => service_error_response(&e, 500),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn update_app_info<S: KeyValueStore>(repo: &AppInfoRepository<S>, request: &ApiRequest) -> Value {
    let Some(id) = path_id(request) else {
        return err_response(400, MISSING_ID_ERROR);
    };

    match repo.update_by_id(id, &body_value(request)).await {
        Ok(record) => json_response(200, &record),
        Err(e) => service_error_response(&e, 400),
    }
}

#[tracing::instrument(level = "info", skip_all, fields(id = ?request.id))]
pub async fn delete_app_info<S: KeyValueStore>(repo: &AppInfoRepository<S>, request: &ApiRequest) -> Value {
    let Some(id) = path_id(request) else {
        return err_response(400, MISSING_ID_ERROR);
    };

    match repo.delete_by_id(id).await {
        Ok(()) => json_response(200, &json!({ "message": "AppInfo deleted successfully" })),
        Err(e) => service_error_response(&e, 500),
    }
}

//! API Lambda handler - thin router that delegates to the record handlers.
//!
//! Routes (an API Gateway stage prefix in front is ignored):
//! - `POST /feedback`, `GET /feedback`, `GET|PUT|PATCH|DELETE /feedback/{id}`
//! - `POST /app-info`, `GET /app-info`, `GET|PUT|PATCH|DELETE /app-info/{id}`

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::{app_info, feedback, helpers, parsing};
use crate::repository::{AppInfoRepository, FeedbackRepository};
use crate::store::KeyValueStore;

pub use self::function_handler as handler;

/// Repositories built once per process and borrowed by every invocation.
pub struct AppState<S> {
    pub feedback: FeedbackRepository<S>,
    pub app_info: AppInfoRepository<S>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(feedback_store: S, app_info_store: S) -> Self {
        Self {
            feedback: FeedbackRepository::new(feedback_store),
            app_info: AppInfoRepository::new(app_info_store),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Feedback,
    AppInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

/// A matched route and the id taken from the path, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub resource: Resource,
    pub operation: Operation,
    pub path_id: Option<String>,
}

fn resource_for(segment: &str) -> Option<Resource> {
    match segment {
        "feedback" => Some(Resource::Feedback),
        "app-info" => Some(Resource::AppInfo),
        _ => None,
    }
}

/// Match a method and path against the route table.
#[must_use]
pub fn resolve_route(method: &str, path: &str) -> Option<Route> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let (last, rest) = segments.split_last()?;

    if let Some(resource) = resource_for(last) {
        let operation = match method {
            "POST" => Operation::Create,
            "GET" => Operation::List,
            _ => return None,
        };
        return Some(Route {
            resource,
            operation,
            path_id: None,
        });
    }

    let resource = rest.last().and_then(|s| resource_for(s))?;
    let operation = match method {
        "GET" => Operation::Get,
        "PUT" | "PATCH" => Operation::Update,
        "DELETE" => Operation::Delete,
        _ => return None,
    };
    Some(Route {
        resource,
        operation,
        path_id: Some((*last).to_string()),
    })
}

/// Route one API Gateway event and produce its `{statusCode, body}` envelope.
pub async fn dispatch<S: KeyValueStore>(state: &AppState<S>, event: &Value) -> Value {
    let (Some(method), Some(path)) = (parsing::request_method(event), parsing::request_path(event))
    else {
        error!("Request missing method or path");
        return helpers::err_response(400, "Missing method or path");
    };

    let Some(route) = resolve_route(&method, path) else {
        warn!(method = %method, path = %path, "No route matched");
        return helpers::err_response(404, "Route not found");
    };

    let mut request = match parsing::parse_request(event) {
        Ok(request) => request,
        Err(e) => return helpers::service_error_response(&e, 400),
    };
    if request.id.is_none() {
        request.id = route.path_id.clone();
    }

    info!(method = %method, path = %path, operation = ?route.operation, "Dispatching request");

    match (route.resource, route.operation) {
        (Resource::Feedback, Operation::Create) => {
            feedback::create_feedback(&state.feedback, &request).await
        }
        (Resource::Feedback, Operation::List) => feedback::list_feedback(&state.feedback).await,
        (Resource::Feedback, Operation::Get) => feedback::get_feedback(&state.feedback, &request).await,
        (Resource::Feedback, Operation::Update) => {
            feedback::update_feedback(&state.feedback, &request).await
        }
        (Resource::Feedback, Operation::Delete) => {
            feedback::delete_feedback(&state.feedback, &request).await
        }
        (Resource::AppInfo, Operation::Create) => {
            app_info::create_app_info(&state.app_info, &request).await
        }
        (Resource::AppInfo, Operation::List) => app_info::list_app_info(&state.app_info).await,
        (Resource::AppInfo, Operation::Get) => app_info::get_app_info(&state.app_info, &request).await,
        (Resource::AppInfo, Operation::Update) => {
            app_info::update_app_info(&state.app_info, &request).await
        }
        (Resource::AppInfo, Operation::Delete) => {
            app_info::delete_app_info(&state.app_info, &request).await
        }
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails: every outcome, including bad input and store failures, is
/// returned as a status-coded JSON envelope.
#[tracing::instrument(level = "info", skip(state, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<S: KeyValueStore>(
    state: &AppState<S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(dispatch(state, &event.payload).await)
}

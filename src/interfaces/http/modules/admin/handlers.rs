//! Admin API handlers
//!
//! Every handler runs the access guard on the caller's role before touching
//! the `AdminService`, then shapes the outcome into the response envelope.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use super::dto::{CreateProjectRequest, CreateUserRequest, PaginationQuery};
use crate::application::admin::{
    resolve_pagination, AdminError, SharedAdminService, UserAdminView, UsersStats,
};
use crate::auth::{authorize, Caller};
use crate::domain::ProjectSummary;
use crate::interfaces::http::common::{
    ApiResponse, MessageResponse, ValidatedJson, ValidatedJsonRejection,
};

/// Admin handler state
#[derive(Clone)]
pub struct AdminHandlerState {
    pub admin_service: SharedAdminService,
}

type HandlerResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), Response>;

fn ok<T>(data: T) -> HandlerResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// Reject callers without the admin role.
fn require_admin(caller: &Caller, operation: &'static str) -> Result<(), Response> {
    authorize(&caller.role).map_err(|_| {
        warn!(
            user_id = %caller.user_id,
            username = %caller.username,
            role = %caller.role,
            operation,
            "Admin access denied"
        );
        metrics::counter!("admin_access_denied_total", "operation" => operation).increment(1);
        admin_error_response(AdminError::Unauthorized {
            role: caller.role.clone(),
        })
    })
}

/// Map an admin error onto a status code and envelope.
pub fn admin_error_response(err: AdminError) -> Response {
    let status = match &err {
        AdminError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        AdminError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AdminError::RetrievalFailed { .. }
        | AdminError::CreationFailed { .. }
        | AdminError::DeletionFailed { .. } => {
            error!(error = %err, "Admin operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ApiResponse::<()>::error(err.to_string()))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users retrieved successfully", body = [UserAdminView]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Failed to retrieve users")
    )
)]
pub async fn list_users(
    State(state): State<AdminHandlerState>,
    caller: Caller,
) -> HandlerResult<Vec<UserAdminView>> {
    debug!(username = %caller.username, role = %caller.role, "Admin list users");
    require_admin(&caller, "list_users")?;

    let users = state
        .admin_service
        .list_users()
        .await
        .map_err(admin_error_response)?;
    ok(users)
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User stats retrieved successfully", body = UsersStats),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Failed to retrieve users stats")
    )
)]
pub async fn get_stats(
    State(state): State<AdminHandlerState>,
    caller: Caller,
) -> HandlerResult<UsersStats> {
    require_admin(&caller, "get_stats")?;

    let stats = state
        .admin_service
        .get_stats()
        .await
        .map_err(admin_error_response)?;
    ok(stats)
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Failed to delete user")
    )
)]
pub async fn delete_user(
    State(state): State<AdminHandlerState>,
    caller: Caller,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse> {
    require_admin(&caller, "delete_user")?;

    let id: i64 = id.parse().map_err(|e| {
        admin_error_response(AdminError::InvalidInput(format!(
            "Invalid user ID '{}': {}",
            id, e
        )))
    })?;

    state
        .admin_service
        .delete_user(id)
        .await
        .map_err(admin_error_response)?;
    ok(MessageResponse::new("User deleted successfully"))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, description = "Invalid request data"),
        (status = 403, description = "Admin role required"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Failed to create user")
    )
)]
pub async fn create_user(
    State(state): State<AdminHandlerState>,
    caller: Caller,
    body: Result<ValidatedJson<CreateUserRequest>, ValidatedJsonRejection>,
) -> HandlerResult<MessageResponse> {
    require_admin(&caller, "create_user")?;
    let ValidatedJson(request) = body.map_err(IntoResponse::into_response)?;

    state
        .admin_service
        .create_user(request.into())
        .await
        .map_err(admin_error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MessageResponse::new(
            "User created successfully",
        ))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/projects",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Projects retrieved successfully", body = [ProjectSummary]),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Failed to retrieve projects")
    )
)]
pub async fn list_projects(
    State(state): State<AdminHandlerState>,
    caller: Caller,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<Vec<ProjectSummary>> {
    require_admin(&caller, "list_projects")?;

    let query = match query {
        Ok(Query(pairs)) => PaginationQuery::from_pairs(pairs),
        Err(e) => {
            debug!(error = %e, "Unreadable pagination query, using defaults");
            PaginationQuery::default()
        }
    };
    let page = resolve_pagination(query.page.as_deref(), query.limit.as_deref());
    let projects = state
        .admin_service
        .list_projects(page)
        .await
        .map_err(admin_error_response)?;
    ok(projects)
}

#[utoipa::path(
    post,
    path = "/api/admin/projects",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectSummary),
        (status = 400, description = "Invalid request payload"),
        (status = 401, description = "User not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Failed to create project")
    )
)]
pub async fn create_project(
    State(state): State<AdminHandlerState>,
    caller: Caller,
    body: Result<ValidatedJson<CreateProjectRequest>, ValidatedJsonRejection>,
) -> HandlerResult<ProjectSummary> {
    require_admin(&caller, "create_project")?;
    if caller.username.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("User not authenticated")),
        )
            .into_response());
    }
    let ValidatedJson(request) = body.map_err(IntoResponse::into_response)?;

    let project = state
        .admin_service
        .create_project(&caller.username, request.into())
        .await
        .map_err(admin_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(project))))
}

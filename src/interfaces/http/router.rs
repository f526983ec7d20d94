//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::MessageResponse;
use super::modules::admin::{self, AdminHandlerState, CreateProjectRequest, CreateUserRequest};
use super::modules::health::{self, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use crate::application::admin::{SharedAdminService, UserAdminView, UsersStats};
use crate::auth::{auth_middleware, AuthState, JwtConfig};
use crate::domain::ProjectSummary;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        admin::list_users,
        admin::create_user,
        admin::delete_user,
        admin::get_stats,
        admin::list_projects,
        admin::create_project,
    ),
    components(schemas(
        UserAdminView,
        UsersStats,
        ProjectSummary,
        CreateUserRequest,
        CreateProjectRequest,
        MessageResponse,
        HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Admin", description = "Admin-only user and project management"),
        (name = "Health", description = "Service liveness")
    ),
    info(title = "ESDC Admin API", version = "0.1.0")
)]
pub struct ApiDoc;

/// Build the admin routes. All of them sit behind the JWT middleware.
fn admin_routes(admin_service: SharedAdminService, auth_state: AuthState) -> Router {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/stats", get(admin::get_stats))
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(AdminHandlerState { admin_service })
}

/// Create the full API router
pub fn create_api_router(
    admin_service: SharedAdminService,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState { jwt_config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/admin", admin_routes(admin_service, auth_state))
        .merge(
            Router::new()
                .route("/health", get(health::health_check))
                .with_state(HealthState::new()),
        )
        .merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState {
                    handle: prometheus_handle,
                }),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::admin::AdminService;
    use crate::auth::create_token;
    use crate::domain::{NewProject, NewUserRecord, ProjectStore, UserStore};
    use crate::infrastructure::{InMemoryProjectStore, InMemoryUserStore};

    struct TestApp {
        router: Router,
        users: Arc<InMemoryUserStore>,
        projects: Arc<InMemoryProjectStore>,
        jwt: JwtConfig,
    }

    impl TestApp {
        fn new() -> Self {
            let users = Arc::new(InMemoryUserStore::new());
            let projects = Arc::new(InMemoryProjectStore::new());
            let service: SharedAdminService = Arc::new(
                AdminService::new(
                    users.clone() as Arc<dyn UserStore>,
                    projects.clone() as Arc<dyn ProjectStore>,
                )
                .with_password_cost(4),
            );
            let jwt = JwtConfig {
                secret: "router-test-secret".into(),
                issuer: "esdc".into(),
                expiration_hours: 1,
            };
            let handle = PrometheusBuilder::new().build_recorder().handle();

            Self {
                router: create_api_router(service, jwt.clone(), handle),
                users,
                projects,
                jwt,
            }
        }

        fn token(&self, username: &str, role: &str) -> String {
            create_token("1", username, role, &self.jwt).unwrap()
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response {
            let mut req = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = match body {
                Some(v) => {
                    req = req.header(header::CONTENT_TYPE, "application/json");
                    Body::from(v.to_string())
                }
                None => Body::empty(),
            };
            self.router
                .clone()
                .oneshot(req.body(body).unwrap())
                .await
                .unwrap()
        }
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_user(app: &TestApp, username: &str) {
        let now = chrono::Utc::now();
        app.users
            .create(NewUserRecord {
                name: username.to_uppercase(),
                username: username.into(),
                email: format!("{}@esdc.dev", username),
                role: "user".into(),
                password_hash: "hash".into(),
                github: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    async fn seed_projects(app: &TestApp, count: usize) {
        for i in 1..=count {
            app.projects
                .create(
                    "root",
                    NewProject {
                        title: format!("Project {i}"),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }
    }

    fn new_user_body(username: &str) -> Value {
        json!({
            "name": "Ada Lovelace",
            "username": username,
            "email": format!("{}@esdc.dev", username),
            "password": "analytical-engine",
            "github_username": "ada-l",
            "role": "user"
        })
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let app = TestApp::new();
        let resp = app.send("GET", "/api/admin/users", None, None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_401() {
        let app = TestApp::new();
        let resp = app
            .send("GET", "/api/admin/stats", Some("not-a-jwt"), None)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_admin_is_403_with_role_echoed() {
        let app = TestApp::new();
        let token = app.token("grace", "user");

        let resp = app.send("GET", "/api/admin/users", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Admin role required. Your role: user");
    }

    #[tokio::test]
    async fn non_admin_cannot_create_even_with_bad_body() {
        let app = TestApp::new();
        let token = app.token("grace", "ADMIN");

        let resp = app
            .send("POST", "/api/admin/users", Some(&token), Some(json!({})))
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app
            .send(
                "POST",
                "/api/admin/users",
                Some(&token),
                Some(new_user_body("mallory")),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(app.users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn every_admin_route_rejects_non_admin_without_touching_stores() {
        let app = TestApp::new();
        seed_user(&app, "grace").await;
        seed_projects(&app, 1).await;
        let token = app.token("grace", "user");

        let routes: &[(&str, &str, Option<Value>)] = &[
            ("GET", "/api/admin/users", None),
            ("POST", "/api/admin/users", Some(new_user_body("mallory"))),
            ("DELETE", "/api/admin/users/1", None),
            ("GET", "/api/admin/stats", None),
            ("GET", "/api/admin/projects", None),
            ("POST", "/api/admin/projects", Some(json!({"title": "Takeover"}))),
        ];

        for (method, uri, body) in routes {
            let resp = app.send(method, uri, Some(&token), body.clone()).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{method} {uri}");
            let body = json_body(resp).await;
            assert_eq!(body["success"], false, "{method} {uri}");
            assert_eq!(
                body["error"], "Admin role required. Your role: user",
                "{method} {uri}"
            );
        }

        assert_eq!(app.users.count().await.unwrap(), 1);
        assert_eq!(app.projects.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn admin_creates_lists_and_deletes_users() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        let resp = app
            .send(
                "POST",
                "/api/admin/users",
                Some(&token),
                Some(new_user_body("ada")),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app.send("GET", "/api/admin/users", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], "ada");
        assert_eq!(users[0]["github_username"], "ada-l");
        assert_eq!(users[0]["status"], "active");
        assert!(users[0].get("password").is_none());
        let id = users[0]["id"].as_u64().unwrap();

        let resp = app
            .send("DELETE", &format!("/api/admin/users/{}", id), Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_user_validation_errors() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        let resp = app
            .send(
                "POST",
                "/api/admin/users",
                Some(&token),
                Some(json!({"name": "x", "username": "x", "email": "bad", "password": ""})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = app
            .send(
                "POST",
                "/api/admin/users",
                Some(&token),
                Some(json!({"name": "x"})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_user_is_500_with_cause() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        for expected in [StatusCode::CREATED, StatusCode::INTERNAL_SERVER_ERROR] {
            let resp = app
                .send(
                    "POST",
                    "/api/admin/users",
                    Some(&token),
                    Some(new_user_body("ada")),
                )
                .await;
            assert_eq!(resp.status(), expected);
            if expected == StatusCode::INTERNAL_SERVER_ERROR {
                let body = json_body(resp).await;
                let message = body["error"].as_str().unwrap();
                assert!(message.starts_with("Failed to create user"));
                assert!(message.contains("Username already exists"));
            }
        }
    }

    #[tokio::test]
    async fn delete_rejects_malformed_and_negative_ids() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        for uri in ["/api/admin/users/abc", "/api/admin/users/-1"] {
            let resp = app.send("DELETE", uri, Some(&token), None).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn delete_missing_user_is_500() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        let resp = app
            .send("DELETE", "/api/admin/users/99", Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn stats_report_counts_and_placeholders() {
        let app = TestApp::new();
        let token = app.token("root", "admin");
        app.projects
            .create(
                "root",
                NewProject {
                    title: "Rover".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let resp = app.send("GET", "/api/admin/stats", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(
            body["data"],
            json!({
                "total_users": 0,
                "total_projects": 1,
                "total_challenges": 5,
                "active_users": 2
            })
        );
    }

    #[tokio::test]
    async fn projects_are_paginated_from_raw_query() {
        let app = TestApp::new();
        let token = app.token("root", "admin");
        seed_projects(&app, 5).await;

        let resp = app
            .send("GET", "/api/admin/projects?page=2&limit=2", Some(&token), None)
            .await;
        let body = json_body(resp).await;
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Project 3", "Project 4"]);

        let resp = app
            .send("GET", "/api/admin/projects?page=abc&limit=5000", Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn repeated_query_keys_use_first_value() {
        let app = TestApp::new();
        let token = app.token("root", "admin");
        seed_projects(&app, 5).await;

        let resp = app
            .send(
                "GET",
                "/api/admin/projects?page=2&page=3&limit=2&limit=9",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Project 3", "Project 4"]);
    }

    #[tokio::test]
    async fn repeated_query_keys_from_non_admin_is_403() {
        let app = TestApp::new();
        let token = app.token("grace", "user");

        let resp = app
            .send(
                "GET",
                "/api/admin/projects?page=1&page=2",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_creates_project_as_caller() {
        let app = TestApp::new();
        let token = app.token("root", "admin");

        let resp = app
            .send(
                "POST",
                "/api/admin/projects",
                Some(&token),
                Some(json!({
                    "title": "Weather station",
                    "description": "ESP32 sensors",
                    "contributers": ["ada", "grace"],
                    "category": "IoT"
                })),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["created_by"], "root");
        assert_eq!(body["data"]["title"], "Weather station");
        assert_eq!(app.projects.count().await.unwrap(), 1);

        let id = body["data"]["id"].as_u64().unwrap();
        let details = app.projects.details(id).unwrap();
        assert_eq!(details.description, "ESP32 sensors");
        assert_eq!(
            details.contributors,
            Some(vec!["ada".to_string(), "grace".to_string()])
        );
    }

    #[tokio::test]
    async fn project_creation_needs_caller_username() {
        let app = TestApp::new();
        let token = app.token("", "admin");

        let resp = app
            .send(
                "POST",
                "/api/admin/projects",
                Some(&token),
                Some(json!({"title": "Anonymous"})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.projects.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn health_and_metrics_are_public() {
        let app = TestApp::new();

        let resp = app.send("GET", "/health", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");

        let resp = app.send("GET", "/metrics", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

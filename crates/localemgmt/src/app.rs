use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use localemgmt_auth::auth_routes;

use crate::{
    handlers::{
        health::{livez, readyz},
        items::{delete_items, list_items, upsert_item, upsert_items},
        meta::{list_bundles, list_langs},
        version::version,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        .route(
            "/items",
            get(list_items).post(upsert_item).delete(delete_items),
        )
        .route("/items/bulk", post(upsert_items))
        .route("/langs", get(list_langs))
        .route("/bundles", get(list_bundles))
        .layer(cors);

    let auth = state.auth.clone();

    Router::new()
        .route("/version", get(version))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(auth_routes().with_state(auth))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::Utc;
    use http_body_util::BodyExt;
    use localemgmt_auth::{AuthConfig, AuthState, InMemorySessionStore, MockProvider};
    use localemgmt_core::auth::{Profile, Session, SessionId, SessionRepository};
    use localemgmt_core::locale::{LocaleFilter, LocaleItem, UpsertReport};
    use localemgmt_core::storage::{LocaleRepository, RepositoryError, Result};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use url::Url;

    use crate::storage::SqliteRepository;

    const SESSION_COOKIE: &str = "auth-session=test-session";

    struct TestApp {
        router: Router,
        sessions: InMemorySessionStore,
    }

    fn auth_state(sessions: InMemorySessionStore) -> AuthState {
        let config = AuthConfig::new(Url::parse("http://localhost:3000").unwrap());
        let provider = MockProvider::developer(config.callback_url().unwrap());
        AuthState::with_provider(Arc::new(sessions), Arc::new(provider), config)
    }

    fn app_with_repo(repo: Arc<dyn LocaleRepository>) -> TestApp {
        let sessions = InMemorySessionStore::new();
        let state = AppState::new(repo, auth_state(sessions.clone()));
        TestApp {
            router: create_app(state, Duration::from_secs(10)),
            sessions,
        }
    }

    async fn test_app() -> TestApp {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        app_with_repo(Arc::new(repo))
    }

    /// Test app with a live session behind [`SESSION_COOKIE`].
    async fn logged_in_app() -> TestApp {
        let app = test_app().await;
        let now = Utc::now();
        app.sessions
            .create_session(&Session {
                id: SessionId::new("test-session"),
                profile: Profile::new("auth0|tester").with_name("Tester"),
                created_at: now,
                expires_at: now + chrono::Duration::hours(1),
            })
            .await
            .unwrap();
        app
    }

    async fn send(
        app: &TestApp,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        app.router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn item(key: &str, bundle: &str, lang: &str, content: &str) -> Value {
        json!({ "key": key, "bundle": bundle, "lang": lang, "content": content })
    }

    // ==================== Health ====================

    #[tokio::test]
    async fn test_livez() {
        let app = test_app().await;
        let response = send(&app, Method::GET, "/livez", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_with_database() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/readyz", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["ready"], true);
    }

    /// Repository whose database is gone.
    struct UnreachableRepository;

    #[async_trait]
    impl LocaleRepository for UnreachableRepository {
        async fn ping(&self) -> Result<()> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn upsert_item(&self, _: &LocaleItem) -> Result<LocaleItem> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn upsert_items(&self, _: &[LocaleItem]) -> Result<UpsertReport> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn query_items(&self, _: &LocaleFilter) -> Result<Vec<LocaleItem>> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn delete_items(&self, _: &LocaleFilter) -> Result<u64> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn list_langs(&self) -> Result<Vec<String>> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
        async fn list_bundles(&self) -> Result<Vec<String>> {
            Err(RepositoryError::Connection("database is gone".to_string()))
        }
    }

    #[tokio::test]
    async fn test_readyz_without_database() {
        let app = app_with_repo(Arc::new(UnreachableRepository));

        let response = send(&app, Method::GET, "/readyz", None, None).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["ready"], false);
    }

    #[tokio::test]
    async fn test_unreachable_database_is_503_on_api() {
        let app = app_with_repo(Arc::new(UnreachableRepository));

        let response = send(&app, Method::GET, "/api/langs", None, None).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json_body(response).await["error"],
            "Connection failed: database is gone"
        );
    }

    // ==================== Items ====================

    #[tokio::test]
    async fn test_list_items_empty_is_not_found() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/items", None, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["error"],
            "Locale items not found: zero items"
        );
    }

    #[tokio::test]
    async fn test_upsert_requires_session() {
        let app = test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/items",
            None,
            Some(item("title", "home", "en", "Welcome")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upsert_then_query() {
        let app = logged_in_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/items",
            Some(SESSION_COOKIE),
            Some(item("title", "home", "en", "Welcome")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let stored = json_body(response).await;
        assert!(stored["id"].is_i64());

        let response = send(
            &app,
            Method::GET,
            "/api/items?key=title&lang=en&bundle=",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let items = json_body(response).await;
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["content"], "Welcome");
        assert_eq!(items[0]["id"], stored["id"]);
    }

    #[tokio::test]
    async fn test_upsert_accepts_bearer_session() {
        let app = logged_in_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/items")
            .header(header::AUTHORIZATION, "Bearer test-session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(item("title", "home", "en", "Hi").to_string()))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upsert_invalid_item_is_bad_request() {
        let app = logged_in_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/items",
            Some(SESSION_COOKIE),
            Some(item("title", "home", "", "Welcome")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Locale item lang cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_upsert_malformed_body_is_bad_request_json() {
        let app = logged_in_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/items",
            Some(SESSION_COOKIE),
            Some(json!({ "key": "title" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body"));
    }

    #[tokio::test]
    async fn test_bulk_upsert_reports_skipped_items() {
        let app = logged_in_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/items/bulk",
            Some(SESSION_COOKIE),
            Some(json!([
                item("one", "home", "en", "One"),
                item("two", "", "en", "Two"),
                item("three", "home", "en", "Three"),
            ])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = json_body(response).await;
        assert_eq!(report["written"], 2);
        assert_eq!(report["skipped"], json!([1]));

        let response = send(&app, Method::GET, "/api/items", None, None).await;
        let keys: Vec<String> = json_body(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["key"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["one", "three"]);
    }

    async fn seed(app: &TestApp) {
        let response = send(
            app,
            Method::POST,
            "/api/items/bulk",
            Some(SESSION_COOKIE),
            Some(json!([
                item("title", "home", "en", "Welcome"),
                item("title", "home", "fr", "Bienvenue"),
                item("logout", "menu", "en", "Sign out"),
            ])),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_requires_session() {
        let app = logged_in_app().await;
        seed(&app).await;

        let response = send(&app, Method::DELETE, "/api/items?bundle=home", None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_by_filter() {
        let app = logged_in_app().await;
        seed(&app).await;

        let response = send(
            &app,
            Method::DELETE,
            "/api/items?bundle=home",
            Some(SESSION_COOKIE),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], 2);

        let response = send(&app, Method::GET, "/api/bundles", None, None).await;
        assert_eq!(json_body(response).await, json!(["menu"]));
    }

    #[tokio::test]
    async fn test_delete_without_matches_returns_zero() {
        let app = logged_in_app().await;
        seed(&app).await;

        let response = send(
            &app,
            Method::DELETE,
            "/api/items?lang=de",
            Some(SESSION_COOKIE),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], 0);
    }

    #[tokio::test]
    async fn test_whitespace_key_delete_is_not_unfiltered() {
        let app = logged_in_app().await;
        seed(&app).await;

        let response = send(
            &app,
            Method::DELETE,
            "/api/items?key=%20",
            Some(SESSION_COOKIE),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], 0);

        let response = send(&app, Method::GET, "/api/items", None, None).await;
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unfiltered_delete_needs_all_flag() {
        let app = logged_in_app().await;
        seed(&app).await;

        let refused = send(
            &app,
            Method::DELETE,
            "/api/items?key=&bundle=",
            Some(SESSION_COOKIE),
            None,
        )
        .await;
        assert_eq!(refused.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::DELETE,
            "/api/items?all=true",
            Some(SESSION_COOKIE),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], 3);
    }

    // ==================== Listings ====================

    #[tokio::test]
    async fn test_list_langs_and_bundles() {
        let app = logged_in_app().await;
        seed(&app).await;

        let langs = send(&app, Method::GET, "/api/langs", None, None).await;
        assert_eq!(langs.status(), StatusCode::OK);
        assert_eq!(json_body(langs).await, json!(["en", "fr"]));

        let bundles = send(&app, Method::GET, "/api/bundles", None, None).await;
        assert_eq!(json_body(bundles).await, json!(["home", "menu"]));
    }

    // ==================== Version and auth ====================

    #[tokio::test]
    async fn test_version_without_session() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/version", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_version_with_session() {
        let app = logged_in_app().await;

        let response = send(&app, Method::GET, "/version", Some(SESSION_COOKIE), None).await;

        let body = json_body(response).await;
        assert_eq!(body["user"]["subject"], "auth0|tester");
        assert_eq!(body["user"]["name"], "Tester");
    }

    #[tokio::test]
    async fn test_login_flow_through_mock_provider() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/login?return_to=/version", None, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let callback = Url::parse(
            response.headers()[header::LOCATION]
                .to_str()
                .unwrap(),
        )
        .unwrap();

        let callback_uri = format!("{}?{}", callback.path(), callback.query().unwrap());
        let response = send(&app, Method::GET, &callback_uri, None, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/version");

        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = send(&app, Method::GET, "/version", Some(&cookie), None).await;
        let body = json_body(response).await;
        assert_eq!(body["user"]["subject"], "mock|developer");

        let response = send(&app, Method::GET, "/logout", Some(&cookie), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, Method::GET, "/version", Some(&cookie), None).await;
        assert!(json_body(response).await["user"].is_null());
    }
}

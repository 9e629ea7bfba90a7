use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, comments, cuisines, likes, photos, price_ranges, restaurants, users};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(users::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(photos::router())
        .merge(comments::router())
        .merge(likes::router())
        .merge(cuisines::router())
        .merge(price_ranges::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use sqlx::PgPool;
    use tower::ServiceExt;

    use crate::test_support;

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authorized(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        send_to(AppState::fake(), request).await
    }

    async fn send_to(state: AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = build_app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_public() {
        let (status, body) = send(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        for (method, uri) in [
            (Method::GET, "/restaurants"),
            (Method::GET, "/restaurants/1"),
            (Method::DELETE, "/restaurants/1"),
            (Method::GET, "/restaurants/1/comments"),
            (Method::POST, "/restaurants/1/likes"),
            (Method::DELETE, "/comments/1"),
            (Method::DELETE, "/restaurants/1/photoUrls/2"),
            (Method::GET, "/cuisines"),
            (Method::GET, "/priceranges"),
            (Method::GET, "/profile"),
            (Method::GET, "/profile/posts"),
            (Method::GET, "/profile/likes"),
        ] {
            let (status, body) = send(
                Request::builder()
                    .method(method.clone())
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
            assert_eq!(body, r#"{"error":"Unauthenticated."}"#, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() {
        let (status, _) = send(
            Request::builder()
                .uri("/restaurants")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = send(
            Request::builder()
                .uri("/nowhere")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn register_login_and_logout(db: PgPool) {
        let (state, _) = test_support::state(db);
        let credentials = serde_json::json!({
            "email": "jmiller@gmail.com",
            "password": "mypassword",
        });

        let (status, body) = send_to(
            state.clone(),
            json_request(
                Method::POST,
                "/users",
                serde_json::json!({
                    "email": "jmiller@gmail.com",
                    "password": "mypassword",
                    "name": "Jim",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = send_to(
            state.clone(),
            json_request(
                Method::POST,
                "/session",
                serde_json::json!({"email": "jmiller@gmail.com", "password": "wrong-password"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Invalid email or password."}"#);

        let (status, body) =
            send_to(state.clone(), json_request(Method::POST, "/session", credentials)).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let session: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(session["name"], "Jim");
        let token = session["token"].as_str().unwrap().to_string();

        let (status, body) = send_to(state.clone(), authorized("/profile", &token)).await;
        assert_eq!(status, StatusCode::OK);
        let profile: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(profile["email"], "jmiller@gmail.com");

        let (status, _) = send_to(
            state.clone(),
            json_request(
                Method::DELETE,
                "/session",
                serde_json::json!({ "token": token }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (status, body) = send_to(state, authorized("/profile", &token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Unauthenticated."}"#);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn incomplete_restaurant_is_rejected(db: PgPool) {
        let user = test_support::user(&db, "jiro").await;
        crate::auth::repo::create(&db, "abcde12345", user.id).await.unwrap();
        let (state, _) = test_support::state(db);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/restaurants")
            .header(header::AUTHORIZATION, "Bearer abcde12345")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({"restaurant": {"name": "Afuri", "cuisine_id": "2"}}).to_string(),
            ))
            .unwrap();
        let (status, body) = send_to(state, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"price_range_id is required."}"#);
    }
}

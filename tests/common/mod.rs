use axum::{
    Extension, Json, Router,
    body::Body,
    http::{Request, Response},
    routing::get,
};
use querycrate::{QueryConfig, QueryRequest};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Echo every decoded parameter back as JSON.
async fn echo_handler(query: QueryRequest) -> Json<Value> {
    let fields: Vec<String> = query.fields().iter().map(querycrate::Column::qualified).collect();
    let sort_directives: Vec<Value> = query
        .sort_directives()
        .into_iter()
        .map(|directive| {
            json!({
                "column": directive.column,
                "descending": directive.is_descending(),
            })
        })
        .collect();

    Json(json!({
        "includes": query.includes(),
        "appends": query.appends(),
        "fields": fields,
        "sorts": query.sorts(),
        "sort_directives": sort_directives,
        "filters": query.filters(),
    }))
}

pub fn setup_test_app(config: Option<QueryConfig>) -> Router {
    // Ignore the error when another test already installed the subscriber
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let router = Router::new().route("/users", get(echo_handler).post(echo_handler));

    match config {
        Some(config) => router.layer(Extension(config)),
        None => router,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_request(uri: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap()
}

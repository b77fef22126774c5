//! Demo operations guarded by the `method` resource policy.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

pub fn router() -> Router {
    Router::new()
        .route("/method/get", get(hello_get))
        .route("/method/post", post(hello_post))
        .route("/method/put", put(hello_put))
        .route("/method/delete", delete(hello_delete))
        .route("/method/patch", patch(hello_patch))
}

pub async fn hello_get() -> &'static str {
    "HelloWorld - GET"
}

pub async fn hello_post() -> &'static str {
    "HelloWorld - POST"
}

pub async fn hello_put() -> &'static str {
    "HelloWorld - PUT"
}

pub async fn hello_delete() -> &'static str {
    "HelloWorld - DELETE"
}

pub async fn hello_patch() -> &'static str {
    "HelloWorld - PATCH"
}

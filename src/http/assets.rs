//! The submission form and its browser script, compiled into the binary.

use axum::{
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::http::server::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SUBMIT_JS: &str = include_str!("../../static/submit.js");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/submit.js", get(script))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], SUBMIT_JS)
}

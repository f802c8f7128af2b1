use askama::Template;
use axum::response::IntoResponse;

use crate::startup::GENERATE_NAME_PATH;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub endpoint: &'static str,
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        endpoint: GENERATE_NAME_PATH,
    }
}

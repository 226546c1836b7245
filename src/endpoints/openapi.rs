use crate::endpoints;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    endpoints::me::get_me,
    endpoints::transactions::query::query,
    endpoints::transactions::create::create,
    endpoints::transactions::import::import,
    endpoints::members::check_payment::check_payment,
))]
struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

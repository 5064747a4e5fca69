use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

use crate::{error_kinds, errors, users::user_controller, users::user_models};

#[derive(OpenApi)]
#[openapi(
    paths(
        user_controller::get_user_by_id,
        user_controller::post_user,
        user_controller::put_user,
    ),
    components(
        schemas(
            errors::ApiError,
            error_kinds::ErrorBody,
            error_kinds::ErrorMessage,
            // user_controller
            user_models::UserDto, // ::get_user_by_id, ::post_user, ::put_user
            user_models::UserFieldsDto, // ::post_user, ::put_user
        )
    ),
    tags(
        (name = "user_controller", description = "Managing user records (Endpoints)."),
    ),
)]
pub struct ApiDoc;

/// The OpenAPI document of the service.
///
/// ```text
/// curl -i -X GET http://localhost:8080/api-docs/openapi.json
/// ```
#[get("/api-docs/openapi.json")]
pub async fn get_openapi() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

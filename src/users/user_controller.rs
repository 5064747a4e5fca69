use std::time::Instant as tm;

use actix_web::{get, http::StatusCode, post, put, web, HttpResponse};
use log::{error, info, log_enabled, Level::Info};
use serde_json::json;
use utoipa;

use crate::{
    error_kinds::{ErrorBody, ErrorKind, MSG_INTERNAL_ERROR, MSG_RESOURCE_NOT_FOUND},
    errors::{code_to_str, ApiError},
    hash_tools,
    settings::err,
    validators::{msg_validation, ValidationError},
};
#[cfg(not(all(test, feature = "mockdata")))]
use crate::users::user_orm::impls::UserOrmApp;
#[cfg(all(test, feature = "mockdata"))]
use crate::users::user_orm::tests::UserOrmApp;
use crate::users::{
    user_models::{CreateUser, ModifyUser, UserDto, UserFieldsDto},
    user_orm::{UserOrm, UserOrmError},
    user_validations::{self, evaluate, Mode, Validation},
};

pub fn configure() -> impl FnOnce(&mut web::ServiceConfig) {
    |config: &mut web::ServiceConfig| {
        config
            // GET /api/users/{id}
            .service(get_user_by_id)
            // POST /api/users
            .service(post_user)
            // PUT /api/users/{id}
            .service(put_user);
    }
}

/// Parse the "id" path parameter. An ID that is not a number cannot belong to any user.
fn parse_user_id(request: &actix_web::HttpRequest) -> Result<i32, ErrorKind> {
    let id_str = request.match_info().query("id");
    id_str.parse::<i32>().map_err(|e| {
        error!("{}-{}; `id` - {} ({})", code_to_str(StatusCode::NOT_FOUND), err::MSG_USER_NOT_FOUND, e, id_str);
        ErrorKind::ResourceNotFound // 404
    })
}

fn user_not_found(id: i32) -> ErrorKind {
    error!("{}-{}; id: {}", code_to_str(StatusCode::NOT_FOUND), err::MSG_USER_NOT_FOUND, id);
    ErrorKind::ResourceNotFound // 404
}

fn blocking_error(e: actix_web::error::BlockingError) -> ApiError {
    error!("{}-{}; {}", code_to_str(StatusCode::VARIANT_ALSO_NEGOTIATES), err::MSG_BLOCKING, &e.to_string());
    ApiError::create(506, err::MSG_BLOCKING, &e.to_string()) // 506
}

fn database_error(e: String) -> ApiError {
    error!("{}-{}; {}", code_to_str(StatusCode::INSUFFICIENT_STORAGE), err::MSG_DATABASE, &e);
    ApiError::create(507, err::MSG_DATABASE, &e) // 507
}

/// Convert a write error, reporting unique index violations as a conflict.
fn write_error(e: UserOrmError) -> ApiError {
    let message = match e {
        UserOrmError::EmailAlreadyUsed => err::MSG_EMAIL_ALREADY_USE,
        UserOrmError::NicknameAlreadyUsed => err::MSG_NICKNAME_ALREADY_USE,
        _ => return database_error(e.to_string()),
    };
    error!("{}-{}", code_to_str(StatusCode::CONFLICT), message);
    ApiError::new(409, message) // 409
}

fn validation_error(errors: Vec<ValidationError>) -> ApiError {
    error!("{}-{}", code_to_str(StatusCode::UNPROCESSABLE_ENTITY), msg_validation(&errors));
    ApiError::validations(errors) // 422
}

/// Read the request body as a field set. An empty body counts as `{}`.
fn parse_user_fields(body: &web::Bytes) -> Result<UserFieldsDto, ApiError> {
    UserFieldsDto::from_body(body).map_err(|e| {
        error!("{}-{}; {}", code_to_str(StatusCode::BAD_REQUEST), err::MSG_INVALID_REQUEST_BODY, &e);
        ApiError::create(400, err::MSG_INVALID_REQUEST_BODY, &e) // 400
    })
}

fn hash_password(password: Option<String>) -> Result<Option<String>, ErrorKind> {
    let Some(password) = password else {
        return Ok(None);
    };
    hash_tools::encode_hash(password).map(Some).map_err(|e| {
        error!("{}-{}; {}", code_to_str(StatusCode::INTERNAL_SERVER_ERROR), err::MSG_ERROR_HASHING_PASSWORD, &e);
        ErrorKind::Internal // 500
    })
}

fn example_user(id: i32, nickname: Option<&str>) -> UserDto {
    UserDto {
        id,
        name: "Jane Doe".to_string(),
        email: "jane_doe@gmail.com".to_string(),
        nickname: nickname.map(|v| v.to_string()),
    }
}

fn example_validation() -> ApiError {
    let user_fields_dto = UserFieldsDto::new(None, None, None, Some(&"a".repeat(30)));
    let (_, errors) = user_validations::check_fields(&user_fields_dto, Mode::Update(1));
    ApiError::validations(errors)
}

// ** Section: get_user_by_id **

/// get_user_by_id
///
/// Get the user with the specified ID.
///
/// One could call with following curl.
/// ```text
/// curl -i -X GET http://localhost:8080/api/users/1
/// ```
///
/// Return the found user (`UserDto`) with status 200 or 404 if there is no such user.
///
#[utoipa::path(
    responses(
        (status = 200, description = "A user with the specified ID was found.", body = UserDto,
            example = json!(example_user(1, Some("jane")))),
        (status = 404, description = "The user with the specified ID was not found.", body = ErrorBody,
            example = json!(ErrorBody::new(MSG_RESOURCE_NOT_FOUND))),
        (status = 506, description = "Blocking error.", body = ApiError,
            example = json!(ApiError::create(506, err::MSG_BLOCKING, "Error while blocking process."))),
        (status = 507, description = "Database error.", body = ApiError,
            example = json!(ApiError::create(507, err::MSG_DATABASE, "Error while querying the database."))),
    ),
    params(("id", description = "Unique user ID.")),
)]
#[get("/api/users/{id}")]
pub async fn get_user_by_id(
    user_orm: web::Data<UserOrmApp>,
    request: actix_web::HttpRequest,
) -> actix_web::Result<HttpResponse> {
    let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

    let id = parse_user_id(&request)?;

    let opt_user = web::block(move || user_orm.get_user_by_id(id).map_err(|e| database_error(e.to_string())))
        .await
        .map_err(blocking_error)??;

    if let Some(timer) = timer {
        info!("get_user_by_id() time: {}", format!("{:.2?}", timer.elapsed()));
    }
    let user = opt_user.ok_or_else(|| user_not_found(id))?;

    Ok(HttpResponse::Ok().json(UserDto::from(user))) // 200
}

// ** Section: post_user **

/// post_user
///
/// Create a new user.
///
/// Request structure:
/// ```text
/// {
///   name: String,      // required - user name (1..191 characters);
///   email: String,     // required - user email (up to 191 characters), must not be in use;
///   password: String,  // required - user password (8..191 characters);
///   nickname?: String, // optional - user nickname (up to 29 characters), must not be in use;
/// }
/// ```
/// An empty body is read as `{}`. A body that is not a JSON object gets 400.
///
/// One could call with following curl.
/// ```text
/// curl -i -X POST http://localhost:8080/api/users -H 'Content-Type: application/json' \
///   -d '{"name": "Jane Doe", "email": "jane_doe@gmail.com", "password": "passwdJ3D", "nickname": "jane"}'
/// ```
///
/// Return the new user (`UserDto`) with status 200.
///
#[utoipa::path(
    request_body = UserFieldsDto,
    responses(
        (status = 200, description = "The user was created.", body = UserDto,
            example = json!(example_user(1, Some("jane")))),
        (status = 400, description = "The request body is not a JSON object.", body = ApiError,
            example = json!(ApiError::create(400, err::MSG_INVALID_REQUEST_BODY, "expected a JSON object; array"))),
        (status = 409, description = "The email (or nickname) is already in use.", body = ApiError,
            example = json!(ApiError::new(409, err::MSG_EMAIL_ALREADY_USE))),
        (status = 422, description = "Validation error.", body = ApiError,
            example = json!(example_validation())),
        (status = 500, description = "Internal error (for example, creating the password hash).", body = ErrorBody,
            example = json!(ErrorBody::new(MSG_INTERNAL_ERROR))),
        (status = 506, description = "Blocking error.", body = ApiError,
            example = json!(ApiError::create(506, err::MSG_BLOCKING, "Error while blocking process."))),
        (status = 507, description = "Database error.", body = ApiError,
            example = json!(ApiError::create(507, err::MSG_DATABASE, "Error while querying the database."))),
    ),
)]
#[post("/api/users")]
pub async fn post_user(
    user_orm: web::Data<UserOrmApp>,
    body: web::Bytes,
) -> actix_web::Result<HttpResponse> {
    let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

    let user_fields_dto = parse_user_fields(&body)?;
    let user_orm2 = user_orm.clone();

    let validation = web::block(move || evaluate(&user_fields_dto, Mode::Create, user_orm2.get_ref()))
        .await
        .map_err(blocking_error)?
        .map_err(database_error)?;

    let user_fields = match validation {
        Validation::Accepted(user_fields) => user_fields,
        Validation::Rejected(errors) => return Err(validation_error(errors).into()), // 422
    };

    let password = hash_password(user_fields.password)?.unwrap_or_default();
    let name = user_fields.name.unwrap_or_default();
    let email = user_fields.email.unwrap_or_default();
    let nickname = user_fields.nickname.flatten();
    let create_user = CreateUser::new(&name, &email, &password, nickname.as_deref());

    let user = web::block(move || user_orm.create_user(create_user).map_err(write_error))
        .await
        .map_err(blocking_error)??;

    if let Some(timer) = timer {
        info!("post_user() time: {}", format!("{:.2?}", timer.elapsed()));
    }
    Ok(HttpResponse::Ok().json(UserDto::from(user))) // 200
}

// ** Section: put_user **

/// put_user
///
/// Update the user with the specified ID.
///
/// Any subset of the fields can be sent, but at least one of them is required.
/// An empty `nickname` (or `null`) clears it.
/// ```text
/// {
///   name?: String,     // optional - user name (1..191 characters);
///   email?: String,    // optional - user email (up to 191 characters), must not be in use by another user;
///   password?: String, // optional - user password (8..191 characters);
///   nickname?: String, // optional - user nickname (up to 29 characters), must not be in use by another user;
/// }
/// ```
///
/// One could call with following curl.
/// ```text
/// curl -i -X PUT http://localhost:8080/api/users/1 -H 'Content-Type: application/json' -d '{"nickname": "jane2"}'
/// ```
///
/// Return the updated user (`UserDto`) with status 200 or 404 if there is no such user.
///
#[utoipa::path(
    request_body = UserFieldsDto,
    responses(
        (status = 200, description = "The user was updated.", body = UserDto,
            example = json!(example_user(1, None))),
        (status = 400, description = "The request body is not a JSON object.", body = ApiError,
            example = json!(ApiError::create(400, err::MSG_INVALID_REQUEST_BODY, "expected a JSON object; array"))),
        (status = 404, description = "The user with the specified ID was not found.", body = ErrorBody,
            example = json!(ErrorBody::new(MSG_RESOURCE_NOT_FOUND))),
        (status = 409, description = "The nickname (or email) is already in use.", body = ApiError,
            example = json!(ApiError::new(409, err::MSG_NICKNAME_ALREADY_USE))),
        (status = 422, description = "Validation error.", body = ApiError,
            example = json!(example_validation())),
        (status = 500, description = "Internal error (for example, creating the password hash).", body = ErrorBody,
            example = json!(ErrorBody::new(MSG_INTERNAL_ERROR))),
        (status = 506, description = "Blocking error.", body = ApiError,
            example = json!(ApiError::create(506, err::MSG_BLOCKING, "Error while blocking process."))),
        (status = 507, description = "Database error.", body = ApiError,
            example = json!(ApiError::create(507, err::MSG_DATABASE, "Error while querying the database."))),
    ),
    params(("id", description = "Unique user ID.")),
)]
#[put("/api/users/{id}")]
pub async fn put_user(
    user_orm: web::Data<UserOrmApp>,
    request: actix_web::HttpRequest,
    body: web::Bytes,
) -> actix_web::Result<HttpResponse> {
    let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

    let id = parse_user_id(&request)?;
    let user_fields_dto = parse_user_fields(&body)?;
    let user_orm2 = user_orm.clone();

    // The user must exist before the fields are checked.
    let opt_validation = web::block(move || -> Result<Option<Validation>, String> {
        if user_orm2.get_user_by_id(id)?.is_none() {
            return Ok(None);
        }
        evaluate(&user_fields_dto, Mode::Update(id), user_orm2.get_ref()).map(Some)
    })
    .await
    .map_err(blocking_error)?
    .map_err(database_error)?;

    let user_fields = match opt_validation {
        None => return Err(user_not_found(id).into()), // 404
        Some(Validation::Rejected(errors)) => return Err(validation_error(errors).into()), // 422
        Some(Validation::Accepted(user_fields)) => user_fields,
    };

    let password = hash_password(user_fields.password)?;
    let modify_user = ModifyUser::new(user_fields.name, user_fields.email, password, user_fields.nickname);

    let opt_user = web::block(move || user_orm.modify_user(id, modify_user).map_err(write_error))
        .await
        .map_err(blocking_error)??;

    if let Some(timer) = timer {
        info!("put_user() time: {}", format!("{:.2?}", timer.elapsed()));
    }
    let user = opt_user.ok_or_else(|| user_not_found(id))?;

    Ok(HttpResponse::Ok().json(UserDto::from(user))) // 200
}

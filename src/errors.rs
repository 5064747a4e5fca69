use std::{borrow::Cow, collections::BTreeMap, error, fmt};

use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, to_value, Value};
use utoipa::ToSchema;

use crate::{settings::err, validators::ValidationError};

// 500 Internal Server Error - Internal error when accessing the server API.
pub const MSG_INTER_SRV_ERROR: &str = "internal_error_accessing_server_api";

pub fn code_to_str(status_code: StatusCode) -> String {
    status_code.canonical_reason().map(|v| v.replace(' ', "")).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: Cow<'static, str>,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default = "ApiError::default_params")]
    // Parameters must be sorted by key.
    #[schema(value_type = Object)]
    pub params: BTreeMap<Cow<'static, str>, Value>,
    #[serde(skip, default = "ApiError::default_status")]
    pub status: u16,
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = to_value(&self.params).unwrap_or_default();
        write!(f, "{}", json!({ "code": self.code, "message": self.message, "params": params }))
    }
}

impl ApiError {
    /// Create a new instance of the ApiError structure.
    pub fn new(status: u16, message: &str) -> Self {
        let status = Self::u16_to_status_code_or_default(status);
        #[rustfmt::skip]
        let message = if !message.is_empty() { message } else { Self::default_message() };
        ApiError {
            code: Cow::from(code_to_str(status)),
            message: Cow::from(message.to_string()),
            params: BTreeMap::new(),
            status: status.as_u16(),
        }
    }
    /// Create a new instance of the ApiError structure from the parameters.
    pub fn create(status: u16, message: &str, text: &str) -> Self {
        ApiError::new(status, &format!("{}; {}", message, text))
    }
    /// Convert value from u16 to StatusCode (or default value).
    pub fn u16_to_status_code_or_default(status: u16) -> StatusCode {
        let default_value = StatusCode::INTERNAL_SERVER_ERROR;
        if status > 0 {
            StatusCode::from_u16(status).unwrap_or(default_value)
        } else {
            default_value
        }
    }
    /// Default value of the "status" field.
    pub fn default_status() -> u16 {
        Self::u16_to_status_code_or_default(0).as_u16()
    }
    /// The default value of the "params" field.
    pub fn default_params() -> BTreeMap<Cow<'static, str>, Value> {
        BTreeMap::new()
    }
    /// The default value of the "message" field.
    pub fn default_message() -> &'static str {
        MSG_INTER_SRV_ERROR
    }
    /// Add a new parameter to the "params" field.
    pub fn add_param<'a, T: Serialize>(&mut self, name: Cow<'a, str>, val: &T) -> Self {
        self.params.insert(name.to_string().into(), to_value(val).unwrap_or_default());
        self.to_owned()
    }
    /// Convert the "status" field to "StatusCode" type.
    pub fn status_code(&self) -> StatusCode {
        Self::u16_to_status_code_or_default(self.status)
    }
    /// Validation errors grouped by field name. (status=422)
    ///
    /// `params` maps each field to the list of its violations, e.g.
    /// `{ "nickname": ["nickname:max_length"] }`.
    pub fn validations(errors: Vec<ValidationError>) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in errors.iter() {
            let messages = fields.entry(error.field().to_string()).or_default();
            messages.push(error.message.to_string());
        }
        let mut api_error = ApiError::new(422, err::MSG_VALIDATION_FAILED);
        for (field, messages) in fields.into_iter() {
            api_error.add_param(Cow::Owned(field), &messages);
        }
        api_error
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status_code()
    }
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(header::ContentType(mime::APPLICATION_JSON))
            .json(self)
    }
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::schema;

// * * * * Section: models for "UserOrm". * * * *

// ** Model: "User". **

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ** Model: "CreateUser". Used: UserOrm::create_user() **

#[derive(Debug, Serialize, Deserialize, Clone, Insertable)]
#[diesel(table_name = schema::users)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub nickname: Option<String>,
}

impl CreateUser {
    pub fn new(name: &str, email: &str, password: &str, nickname: Option<&str>) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            nickname: nickname.map(|v| v.to_string()),
        }
    }
}

// ** Model: "ModifyUser". Used: UserOrm::modify_user() **

/// `None` leaves the column unchanged. For `nickname`, `Some(None)` sets it to NULL.
#[derive(Debug, Serialize, Deserialize, Clone, AsChangeset)]
#[diesel(table_name = schema::users)]
pub struct ModifyUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ModifyUser {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
        nickname: Option<Option<String>>,
    ) -> ModifyUser {
        ModifyUser {
            name,
            email,
            password,
            nickname,
            updated_at: Utc::now(),
        }
    }
}

// * * * * Section: models for "UserController". * * * *

// ** Model Dto: "UserDto". Used: in "UserController". **

/// The user as returned by the API. The password is never part of it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub nickname: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            nickname: user.nickname,
        }
    }
}

// ** Model Dto: "UserFieldsDto". Used: in "UserController::post_user()", "UserController::put_user()". **

/// The submitted field set, as raw JSON values.
///
/// A missing key is `None`; an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Serialize, Clone, Default, PartialEq, ToSchema)]
pub struct UserFieldsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "Jane Doe")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "JaneDoe@email.com")]
    pub email: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "correct horse battery staple")]
    pub password: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "lalu")]
    pub nickname: Option<Value>,
}

impl UserFieldsDto {
    pub fn new(name: Option<&str>, email: Option<&str>, password: Option<&str>, nickname: Option<&str>) -> Self {
        let to_value = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));
        UserFieldsDto {
            name: to_value(name),
            email: to_value(email),
            password: to_value(password),
            nickname: to_value(nickname),
        }
    }
    /// Take the known keys of a JSON object. Other keys are ignored.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        UserFieldsDto {
            name: map.remove("name"),
            email: map.remove("email"),
            password: map.remove("password"),
            nickname: map.remove("nickname"),
        }
    }
    /// Parse a request body. An empty body is an empty field set; anything but a JSON object is an error.
    pub fn from_body(body: &[u8]) -> Result<Self, String> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(UserFieldsDto::default());
        }
        match serde_json::from_slice::<Value>(body).map_err(|e| e.to_string())? {
            Value::Object(map) => Ok(UserFieldsDto::from_map(map)),
            value => Err(format!("{}; {}", MSG_EXPECTED_OBJECT, json_type(&value))),
        }
    }
}

pub const MSG_EXPECTED_OBJECT: &str = "expected a JSON object";

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub mod user_controller;
#[cfg(all(test, feature = "mockdata"))]
pub mod user_mock;
pub mod user_models;
pub mod user_orm;
mod user_test_get;
pub mod user_validations;

pub mod config_app;
pub mod err;

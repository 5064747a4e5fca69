use actix_cors::Cors;
use actix_web::{http, web};

use users::{user_controller, user_orm::get_user_orm_app};

pub mod dbase;
pub mod error_kinds;
pub mod errors;
pub mod hash_tools;
pub mod schema;
pub mod settings;
pub mod swagger_docs;
pub mod users;
pub mod validators;

pub fn configure_server(pool: dbase::DbPool) -> Box<dyn Fn(&mut web::ServiceConfig)> {
    Box::new(move |cfg: &mut web::ServiceConfig| {
        let data_user_orm = web::Data::new(get_user_orm_app(pool.clone()));

        cfg.app_data(web::Data::clone(&data_user_orm))
            .service(swagger_docs::get_openapi)
            .configure(user_controller::configure());
    })
}

pub fn create_cors(config_app: settings::config_app::ConfigApp) -> Cors {
    let app_domain = config_app.app_domain;
    // Maximum number of seconds the results can be cached.
    let app_max_age = config_app.app_max_age;

    let mut cors = Cors::default()
        .allowed_origin(&app_domain.to_string())
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![http::header::ACCEPT, http::header::ACCESS_CONTROL_ALLOW_ORIGIN])
        .allowed_header(http::header::CONTENT_TYPE)
        .max_age(app_max_age);

    let cors_allowed_origin: Vec<&str> = config_app.app_allowed_origin.split(',').collect();
    for allowed_origin in cors_allowed_origin.into_iter().map(|v| v.trim()).filter(|v| v.len() > 0) {
        cors = cors.allowed_origin(allowed_origin)
    }
    cors
}

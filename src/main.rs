use std::io;

use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};

use users_api::{configure_server, create_cors, dbase, error_kinds, settings::config_app};

// ** Function Main **
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenv::dotenv() {
        eprintln!("The .env file was not loaded: {}", e);
    }

    if std::env::var_os("RUST_LOG").is_none() {
        let log = "info,actix_web=info,actix_server=info,users_api=info";
        std::env::set_var("RUST_LOG", log);
    }
    env_logger::init();

    let config_app = config_app::ConfigApp::init_by_env();

    let app_host = config_app.app_host.clone();
    let app_port = config_app.app_port;
    let app_domain = config_app.app_domain.clone();
    let app_num_workers = config_app.app_num_workers;

    let to_io_error = |msg: String| {
        error!("{}", &msg);
        io::Error::new(io::ErrorKind::Other, msg)
    };
    let db_url = std::env::var("DATABASE_URL").map_err(|e| to_io_error(format!("DATABASE_URL: {}", e)))?;

    let pool: dbase::DbPool = dbase::init_db_pool(&db_url).map_err(to_io_error)?;
    let mut conn = pool.get().map_err(|e| to_io_error(format!("Failed to get a connection: {}", e)))?;
    dbase::run_migration(&mut conn).map_err(to_io_error)?;
    drop(conn);

    info!("Starting server {}", &app_domain);

    let mut server = HttpServer::new(move || {
        let cors = create_cors(config_app.clone());
        App::new()
            .configure(configure_server(pool.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            // Any route that is not registered.
            .default_service(web::route().to(error_kinds::resource_not_found))
    })
    .bind(&format!("{}:{}", &app_host, &app_port))?;

    if let Some(num_workers) = app_num_workers {
        server = server.workers(num_workers);
    }

    server.run().await
}

use diesel::{
    r2d2::{ConnectionManager, Pool, PooledConnection},
    PgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

pub type Connection = PgConnection;

pub type DbPool = Pool<ConnectionManager<Connection>>;

pub type DbPooledConnection = PooledConnection<ConnectionManager<Connection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub const POOL_MAX_SIZE: u32 = 15;

pub fn init_db_pool(db_url: &str) -> Result<DbPool, String> {
    info!("Configuring database.");
    let manager = ConnectionManager::<Connection>::new(db_url);
    let db_pool = Pool::builder()
        .max_size(POOL_MAX_SIZE)
        .build(manager)
        .map_err(|e| format!("Failed to create pool: {}", e))?;

    info!("db_pool.max_size(): {}", db_pool.max_size());
    Ok(db_pool)
}

pub fn run_migration(conn: &mut PgConnection) -> Result<(), String> {
    let versions = conn.run_pending_migrations(MIGRATIONS).map_err(|e| format!("Failed to run migrations: {}", e))?;
    for version in versions.iter() {
        info!("Migration applied: {}", version);
    }
    Ok(())
}

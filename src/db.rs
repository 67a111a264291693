use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::config::SeedInstitute;
use crate::errors::AppError;
use crate::models::Institute;
use crate::store::Store;

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create or refresh the development login from `SEED_INSTITUTE`.
pub async fn seed_institute(store: &Store, seed: &SeedInstitute) -> Result<(), AppError> {
    let institute = Institute {
        id: seed.id.clone(),
        name: seed.name.clone(),
        password_hash: password::hash_password(&seed.password)?,
    };
    store.upsert_institute(&institute).await?;
    log::info!("Seeded institute login {:?}", seed.id);
    Ok(())
}

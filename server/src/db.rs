use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

/// Opens the long-lived pool. No schema is managed here; connecting and one
/// round trip is the whole bootstrap.
pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    ping(&pool).await?;
    Ok(pool)
}

pub async fn ping(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

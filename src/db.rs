use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;

use crate::error::ApiResult;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Builds the connection pool and checks one connection out so a bad
/// `DATABASE_URL` fails at startup instead of on the first request.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder().max_size(max_size).build(manager)?;
    pool.get()?;
    Ok(pool)
}

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// The connection goes back to the pool when the closure returns, whether
/// `f` succeeded or not.
pub async fn run<F, T>(pool: &DbPool, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> ApiResult<T> {
        let mut conn = pool.get()?;
        Ok(f(&mut conn)?)
    })
    .await?
}

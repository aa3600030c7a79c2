//! Connection pool setup and database bootstrap.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub async fn connect(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await
}

/// Create the database named in `database_url` when it does not exist yet,
/// connecting through the `postgres` maintenance database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin_url, db_name)) = split_database_name(database_url) else {
        return Err(AppError::Internal("DATABASE_URL has no database name".into()));
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn = opts.connect().await?;
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into the maintenance-database URL (query string kept) and the database name.
fn split_database_name(url: &str) -> Option<(String, String)> {
    let authority = url.find("://").map(|i| i + 3).unwrap_or(0);
    let slash = authority + url.get(authority..)?.find('/')?;
    let (base, rest) = url.split_at(slash + 1);
    let (name, query) = match rest.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (rest, None),
    };
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Some((admin_url, name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_and_keeps_query() {
        assert_eq!(
            split_database_name("postgres://u:p@localhost:5432/stock?sslmode=disable"),
            Some((
                "postgres://u:p@localhost:5432/postgres?sslmode=disable".to_string(),
                "stock".to_string()
            ))
        );
        assert_eq!(
            split_database_name("postgres://localhost/stock"),
            Some(("postgres://localhost/postgres".to_string(), "stock".to_string()))
        );
    }

    #[test]
    fn url_without_path_has_no_name() {
        assert_eq!(split_database_name("postgres://localhost:5432"), None);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}

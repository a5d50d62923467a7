//! Location rows.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use stockroom_core::LocationId;
use stockroom_locations::Location;

use crate::error::{ServiceError, ServiceResult};

fn from_row(row: &SqliteRow) -> ServiceResult<Location> {
    let id: String = row.try_get("location_id")?;
    Ok(Location {
        location_id: LocationId::parse(&id)
            .map_err(|e| ServiceError::decode(format!("locations.location_id: {e}")))?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
    })
}

pub async fn find(conn: &mut SqliteConnection, id: &LocationId) -> ServiceResult<Option<Location>> {
    let row = sqlx::query(
        r#"
        SELECT location_id, name, address
        FROM locations
        WHERE location_id = ?1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// All locations in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> ServiceResult<Vec<Location>> {
    let rows = sqlx::query(
        r#"
        SELECT location_id, name, address
        FROM locations
        ORDER BY rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn insert(conn: &mut SqliteConnection, location: &Location) -> ServiceResult<()> {
    sqlx::query("INSERT INTO locations (location_id, name, address) VALUES (?1, ?2, ?3)")
        .bind(location.location_id.as_str())
        .bind(&location.name)
        .bind(location.address.as_deref())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn update(conn: &mut SqliteConnection, location: &Location) -> ServiceResult<u64> {
    let done = sqlx::query("UPDATE locations SET name = ?2, address = ?3 WHERE location_id = ?1")
        .bind(location.location_id.as_str())
        .bind(&location.name)
        .bind(location.address.as_deref())
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, id: &LocationId) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM locations WHERE location_id = ?1")
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM locations").execute(&mut *conn).await?;
    Ok(done.rows_affected())
}

pub async fn count(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n as u64)
}

//! Movement rows.
//!
//! Timestamps are stored as integer microseconds since the Unix epoch so
//! that `ORDER BY` is numeric.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use stockroom_core::{LocationId, MovementId, ProductId, Quantity};
use stockroom_inventory::{Movement, MovementView};

use crate::error::{ServiceError, ServiceResult};

const VIEW_SELECT: &str = r#"
    SELECT
        m.movement_id,
        m.timestamp_us,
        m.from_location,
        m.to_location,
        m.product_id,
        m.qty,
        p.name  AS product_name,
        fl.name AS from_location_name,
        tl.name AS to_location_name
    FROM movements m
    JOIN products p ON p.product_id = m.product_id
    LEFT JOIN locations fl ON fl.location_id = m.from_location
    LEFT JOIN locations tl ON tl.location_id = m.to_location
"#;

fn encode_timestamp(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

fn decode_timestamp(micros: i64) -> ServiceResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
        ServiceError::decode(format!("movements.timestamp_us out of range: {micros}"))
    })
}

fn decode_location(column: &str, raw: Option<String>) -> ServiceResult<Option<LocationId>> {
    raw.map(|s| {
        LocationId::parse(&s).map_err(|e| ServiceError::decode(format!("movements.{column}: {e}")))
    })
    .transpose()
}

fn from_row(row: &SqliteRow) -> ServiceResult<Movement> {
    let movement_id: String = row.try_get("movement_id")?;
    let product_id: String = row.try_get("product_id")?;
    let qty: i64 = row.try_get("qty")?;

    Ok(Movement {
        movement_id: MovementId::parse(&movement_id)
            .map_err(|e| ServiceError::decode(format!("movements.movement_id: {e}")))?,
        product_id: ProductId::parse(&product_id)
            .map_err(|e| ServiceError::decode(format!("movements.product_id: {e}")))?,
        from_location: decode_location("from_location", row.try_get("from_location")?)?,
        to_location: decode_location("to_location", row.try_get("to_location")?)?,
        qty: Quantity::new(qty).map_err(|e| ServiceError::decode(format!("movements.qty: {e}")))?,
        timestamp: decode_timestamp(row.try_get("timestamp_us")?)?,
    })
}

fn view_from_row(row: &SqliteRow) -> ServiceResult<MovementView> {
    Ok(MovementView {
        movement: from_row(row)?,
        product_name: row.try_get("product_name")?,
        from_location_name: row.try_get("from_location_name")?,
        to_location_name: row.try_get("to_location_name")?,
    })
}

pub async fn find(conn: &mut SqliteConnection, id: &MovementId) -> ServiceResult<Option<Movement>> {
    let row = sqlx::query(
        r#"
        SELECT movement_id, timestamp_us, from_location, to_location, product_id, qty
        FROM movements
        WHERE movement_id = ?1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn find_view(
    conn: &mut SqliteConnection,
    id: &MovementId,
) -> ServiceResult<Option<MovementView>> {
    let sql = format!("{VIEW_SELECT} WHERE m.movement_id = ?1");
    let row = sqlx::query(&sql)
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(view_from_row).transpose()
}

/// Every movement with display names, newest first.
pub async fn list_views(conn: &mut SqliteConnection) -> ServiceResult<Vec<MovementView>> {
    let sql = format!("{VIEW_SELECT} ORDER BY m.timestamp_us DESC, m.movement_id DESC");
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
    rows.iter().map(view_from_row).collect()
}

/// Every movement, oldest first.
pub async fn list(conn: &mut SqliteConnection) -> ServiceResult<Vec<Movement>> {
    let rows = sqlx::query(
        r#"
        SELECT movement_id, timestamp_us, from_location, to_location, product_id, qty
        FROM movements
        ORDER BY timestamp_us, movement_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn insert(conn: &mut SqliteConnection, movement: &Movement) -> ServiceResult<()> {
    sqlx::query(
        r#"
        INSERT INTO movements (movement_id, timestamp_us, from_location, to_location, product_id, qty)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(movement.movement_id.as_str())
    .bind(encode_timestamp(movement.timestamp))
    .bind(movement.from_location.as_ref().map(LocationId::as_str))
    .bind(movement.to_location.as_ref().map(LocationId::as_str))
    .bind(movement.product_id.as_str())
    .bind(movement.qty.get())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn update(conn: &mut SqliteConnection, movement: &Movement) -> ServiceResult<u64> {
    let done = sqlx::query(
        r#"
        UPDATE movements
        SET timestamp_us = ?2,
            from_location = ?3,
            to_location = ?4,
            product_id = ?5,
            qty = ?6
        WHERE movement_id = ?1
        "#,
    )
    .bind(movement.movement_id.as_str())
    .bind(encode_timestamp(movement.timestamp))
    .bind(movement.from_location.as_ref().map(LocationId::as_str))
    .bind(movement.to_location.as_ref().map(LocationId::as_str))
    .bind(movement.product_id.as_str())
    .bind(movement.qty.get())
    .execute(&mut *conn)
    .await?;
    Ok(done.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, id: &MovementId) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM movements WHERE movement_id = ?1")
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM movements").execute(&mut *conn).await?;
    Ok(done.rows_affected())
}

pub async fn count(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movements")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n as u64)
}

/// Movements of the given product.
pub async fn count_for_product(conn: &mut SqliteConnection, id: &ProductId) -> ServiceResult<u64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movements WHERE product_id = ?1")
        .bind(id.as_str())
        .fetch_one(&mut *conn)
        .await?;
    Ok(n as u64)
}

/// Movements naming the location as source or destination (each counted once).
pub async fn count_for_location(
    conn: &mut SqliteConnection,
    id: &LocationId,
) -> ServiceResult<u64> {
    let n: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM movements WHERE from_location = ?1 OR to_location = ?1",
    )
    .bind(id.as_str())
    .fetch_one(&mut *conn)
    .await?;
    Ok(n as u64)
}

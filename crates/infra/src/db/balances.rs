//! Grouped balance aggregation.

use sqlx::{Row, SqliteConnection};

use stockroom_core::{LocationId, ProductId};
use stockroom_inventory::Balance;

use crate::error::{ServiceError, ServiceResult};

/// Positive (product, location) balances in one grouped query.
///
/// The join only pairs a movement with the locations it names, and both
/// `CASE` arms are evaluated per row, so a movement whose source and
/// destination coincide nets to zero exactly as the per-pair double sum does.
pub async fn positive(conn: &mut SqliteConnection) -> ServiceResult<Vec<Balance>> {
    let rows = sqlx::query(
        r#"
        SELECT
            p.product_id,
            p.name AS product_name,
            l.location_id,
            l.name AS location_name,
            SUM(CASE WHEN m.to_location = l.location_id THEN m.qty ELSE 0 END)
              - SUM(CASE WHEN m.from_location = l.location_id THEN m.qty ELSE 0 END) AS balance
        FROM products p
        CROSS JOIN locations l
        JOIN movements m
          ON m.product_id = p.product_id
         AND (m.to_location = l.location_id OR m.from_location = l.location_id)
        GROUP BY p.product_id, l.location_id
        HAVING balance > 0
        ORDER BY p.rowid, l.rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|row| -> ServiceResult<Balance> {
            let product_id: String = row.try_get("product_id")?;
            let location_id: String = row.try_get("location_id")?;
            Ok(Balance {
                product_id: ProductId::parse(&product_id)
                    .map_err(|e| ServiceError::decode(format!("balance.product_id: {e}")))?,
                product_name: row.try_get("product_name")?,
                location_id: LocationId::parse(&location_id)
                    .map_err(|e| ServiceError::decode(format!("balance.location_id: {e}")))?,
                location_name: row.try_get("location_name")?,
                balance: row.try_get("balance")?,
            })
        })
        .collect()
}

//! Product rows.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use stockroom_core::ProductId;
use stockroom_products::Product;

use crate::error::{ServiceError, ServiceResult};

fn from_row(row: &SqliteRow) -> ServiceResult<Product> {
    let id: String = row.try_get("product_id")?;
    Ok(Product {
        product_id: ProductId::parse(&id)
            .map_err(|e| ServiceError::decode(format!("products.product_id: {e}")))?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

pub async fn find(conn: &mut SqliteConnection, id: &ProductId) -> ServiceResult<Option<Product>> {
    let row = sqlx::query(
        r#"
        SELECT product_id, name, description
        FROM products
        WHERE product_id = ?1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// All products in insertion order.
pub async fn list(conn: &mut SqliteConnection) -> ServiceResult<Vec<Product>> {
    let rows = sqlx::query(
        r#"
        SELECT product_id, name, description
        FROM products
        ORDER BY rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn insert(conn: &mut SqliteConnection, product: &Product) -> ServiceResult<()> {
    sqlx::query("INSERT INTO products (product_id, name, description) VALUES (?1, ?2, ?3)")
        .bind(product.product_id.as_str())
        .bind(&product.name)
        .bind(product.description.as_deref())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn update(conn: &mut SqliteConnection, product: &Product) -> ServiceResult<u64> {
    let done = sqlx::query("UPDATE products SET name = ?2, description = ?3 WHERE product_id = ?1")
        .bind(product.product_id.as_str())
        .bind(&product.name)
        .bind(product.description.as_deref())
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, id: &ProductId) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM products WHERE product_id = ?1")
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let done = sqlx::query("DELETE FROM products").execute(&mut *conn).await?;
    Ok(done.rows_affected())
}

pub async fn count(conn: &mut SqliteConnection) -> ServiceResult<u64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n as u64)
}

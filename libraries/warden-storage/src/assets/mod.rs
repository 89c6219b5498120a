//! Asset queries

use crate::error::Result;
use warden_core::types::{Asset, AssetId, NewAsset, UserId};
use sqlx::{Row, SqlitePool};

/// Create an asset and link it to its users
///
/// Repeated user references are linked once.
pub async fn create(pool: &SqlitePool, new_asset: NewAsset) -> Result<Asset> {
    let new_asset = new_asset.dedup_users();
    let id = AssetId::generate();
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO assets (id, balance, symbol, created_at) VALUES (?, ?, ?, ?)")
        .bind(id.as_str())
        .bind(new_asset.balance)
        .bind(&new_asset.symbol)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    for (position, user_id) in new_asset.users.iter().enumerate() {
        sqlx::query("INSERT INTO asset_users (asset_id, user_id, position) VALUES (?, ?, ?)")
            .bind(id.as_str())
            .bind(user_id.as_str())
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Asset {
        id,
        balance: new_asset.balance,
        symbol: new_asset.symbol,
        users: new_asset.users,
    })
}

/// Get up to `limit` assets in insertion order, with their user references
pub async fn list(pool: &SqlitePool, limit: u32) -> Result<Vec<Asset>> {
    let rows = sqlx::query(
        "SELECT a.id, a.balance, a.symbol,
                (SELECT json_group_array(user_id)
                   FROM (SELECT user_id FROM asset_users
                          WHERE asset_id = a.id ORDER BY position)) AS users
         FROM assets a
         ORDER BY a.rowid
         LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| -> Result<Asset> {
            let users: String = row.try_get("users")?;
            let users: Vec<String> = serde_json::from_str(&users)?;

            Ok(Asset {
                id: AssetId::new(row.try_get::<String, _>("id")?),
                balance: row.try_get("balance")?,
                symbol: row.try_get("symbol")?,
                users: users.into_iter().map(UserId::new).collect(),
            })
        })
        .collect()
}

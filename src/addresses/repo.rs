use async_trait::async_trait;
use sqlx::PgPool;

use crate::addresses::repo_types::Address;

#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Insert (`id == 0`) or update by identifier, returning the stored row.
    async fn save(&self, address: Address) -> anyhow::Result<Address>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Address>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Address>>;
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgAddressStore {
    db: PgPool,
}

impl PgAddressStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn save(&self, address: Address) -> anyhow::Result<Address> {
        let saved = if address.id == 0 {
            sqlx::query_as::<_, Address>(
                r#"
                INSERT INTO addresses (street, number_house, city, postal_index, active)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, street, number_house, city, postal_index, active
                "#,
            )
            .bind(&address.street)
            .bind(address.number_house)
            .bind(&address.city)
            .bind(&address.postal_index)
            .bind(address.active)
            .fetch_one(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, Address>(
                r#"
                UPDATE addresses
                SET street = $2, number_house = $3, city = $4, postal_index = $5, active = $6
                WHERE id = $1
                RETURNING id, street, number_house, city, postal_index, active
                "#,
            )
            .bind(address.id)
            .bind(&address.street)
            .bind(address.number_house)
            .bind(&address.city)
            .bind(&address.postal_index)
            .bind(address.active)
            .fetch_one(&self.db)
            .await?
        };
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, street, number_house, city, postal_index, active
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(address)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Address>> {
        let rows = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, street, number_house, city, postal_index, active
            FROM addresses
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM addresses WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

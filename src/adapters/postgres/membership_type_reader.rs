//! PostgreSQL implementation of MembershipTypeReader.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipTypeId};
use crate::domain::membership::MembershipType;
use crate::ports::MembershipTypeReader;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresMembershipTypeReader {
    pool: PgPool,
}

impl PostgresMembershipTypeReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipTypeRow {
    id: i64,
    name: String,
    is_active: bool,
}

impl From<MembershipTypeRow> for MembershipType {
    fn from(row: MembershipTypeRow) -> Self {
        MembershipType {
            id: MembershipTypeId::from_raw(row.id),
            name: row.name,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl MembershipTypeReader for PostgresMembershipTypeReader {
    async fn list(&self) -> Result<Vec<MembershipType>, DomainError> {
        let rows: Vec<MembershipTypeRow> =
            sqlx::query_as("SELECT id, name, is_active FROM membership_types ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to load membership types: {}", e),
                    )
                })?;

        Ok(rows.into_iter().map(MembershipType::from).collect())
    }

    async fn find_by_id(&self, id: MembershipTypeId) -> Result<Option<MembershipType>, DomainError> {
        let row: Option<MembershipTypeRow> =
            sqlx::query_as("SELECT id, name, is_active FROM membership_types WHERE id = $1")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find membership type: {}", e),
                    )
                })?;

        Ok(row.map(MembershipType::from))
    }
}

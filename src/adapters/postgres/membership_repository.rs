//! PostgreSQL implementation of MembershipRepository.
//!
//! Reads membership rows for recalculation and rewrites their status column.

use crate::domain::foundation::{
    ContactId, DomainError, ErrorCode, MembershipId, MembershipStatusId, MembershipTypeId,
};
use crate::domain::membership::{Membership, StatusOverride};
use crate::ports::{MembershipFilter, MembershipRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// PostgreSQL implementation of the MembershipRepository port.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    contact_id: i64,
    membership_type_id: i64,
    join_date: NaiveDate,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    status_id: i64,
    is_test: bool,
    is_override: bool,
    status_override_end_date: Option<NaiveDate>,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Membership {
            id: MembershipId::from_raw(row.id),
            contact_id: ContactId::from_raw(row.contact_id),
            membership_type_id: MembershipTypeId::from_raw(row.membership_type_id),
            join_date: row.join_date,
            start_date: row.start_date,
            end_date: row.end_date,
            status_id: MembershipStatusId::from_raw(row.status_id),
            is_test: row.is_test,
            status_override: parse_override(row.is_override, row.status_override_end_date),
        }
    }
}

fn parse_override(is_override: bool, until: Option<NaiveDate>) -> StatusOverride {
    match (is_override, until) {
        (false, _) => StatusOverride::None,
        (true, None) => StatusOverride::Permanent,
        (true, Some(until)) => StatusOverride::Until(until),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, contact_id, membership_type_id, join_date, start_date, end_date,
           status_id, is_test, is_override, status_override_end_date
    FROM memberships
"#;

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_matching(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError> {
        let excluded: Vec<i64> = filter
            .excluded_status_ids
            .iter()
            .map(MembershipStatusId::as_i64)
            .collect();

        let query = format!(
            "{} WHERE NOT (status_id = ANY($1)) AND ($2 = FALSE OR is_test = FALSE) ORDER BY id ASC",
            SELECT_COLUMNS
        );
        let rows: Vec<MembershipRow> = sqlx::query_as(&query)
            .bind(&excluded)
            .bind(filter.exclude_test)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to load memberships: {}", e),
                )
            })?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let query = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<MembershipRow> = sqlx::query_as(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to find membership: {}", e))
            })?;

        Ok(row.map(Membership::from))
    }

    async fn update_status(
        &self,
        id: &MembershipId,
        status_id: MembershipStatusId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE memberships SET status_id = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(status_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to update membership status: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership not found: {}", id),
            ));
        }

        Ok(())
    }
}

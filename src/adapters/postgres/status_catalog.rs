//! PostgreSQL implementation of StatusCatalog.
//!
//! Rules are stored flattened: a `rule_kind` column plus start/end event,
//! adjustment unit and interval columns.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipStatusId};
use crate::domain::membership::{
    DateBoundary, DateEvent, DateOffset, MembershipStatus, OffsetUnit, StatusRule,
};
use crate::ports::StatusCatalog;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the StatusCatalog port.
pub struct PostgresStatusCatalog {
    pool: PgPool,
}

impl PostgresStatusCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatusRow {
    id: i64,
    name: String,
    label: String,
    weight: i32,
    is_active: bool,
    is_current_member: bool,
    is_reserved: bool,
    rule_kind: String,
    start_event: Option<String>,
    start_event_adjust_unit: Option<String>,
    start_event_adjust_interval: Option<i32>,
    end_event: Option<String>,
    end_event_adjust_unit: Option<String>,
    end_event_adjust_interval: Option<i32>,
}

impl TryFrom<StatusRow> for MembershipStatus {
    type Error = DomainError;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        let rule = match row.rule_kind.to_lowercase().as_str() {
            "manual" => StatusRule::Manual,
            "date_window" => {
                let start = parse_boundary(
                    row.start_event.as_deref(),
                    row.start_event_adjust_unit.as_deref(),
                    row.start_event_adjust_interval,
                )?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Status {} has a date window without a start event", row.name),
                    )
                })?;
                let end = parse_boundary(
                    row.end_event.as_deref(),
                    row.end_event_adjust_unit.as_deref(),
                    row.end_event_adjust_interval,
                )?;
                StatusRule::DateWindow { start, end }
            }
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid rule kind: {}", other),
                ))
            }
        };

        Ok(MembershipStatus {
            id: MembershipStatusId::from_raw(row.id),
            name: row.name,
            label: row.label,
            weight: row.weight,
            is_active: row.is_active,
            is_current_member: row.is_current_member,
            is_reserved: row.is_reserved,
            rule,
        })
    }
}

fn parse_event(s: &str) -> Result<DateEvent, DomainError> {
    match s.to_lowercase().as_str() {
        "join_date" => Ok(DateEvent::JoinDate),
        "start_date" => Ok(DateEvent::StartDate),
        "end_date" => Ok(DateEvent::EndDate),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid event value: {}", s),
        )),
    }
}

fn parse_unit(s: &str) -> Result<OffsetUnit, DomainError> {
    match s.to_lowercase().as_str() {
        "day" => Ok(OffsetUnit::Day),
        "month" => Ok(OffsetUnit::Month),
        "year" => Ok(OffsetUnit::Year),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid adjustment unit: {}", s),
        )),
    }
}

/// A missing event means no boundary. Unit and interval are set together or
/// not at all.
fn parse_boundary(
    event: Option<&str>,
    unit: Option<&str>,
    interval: Option<i32>,
) -> Result<Option<DateBoundary>, DomainError> {
    let Some(event) = event else {
        return Ok(None);
    };
    let event = parse_event(event)?;
    let offset = match (unit, interval) {
        (Some(unit), Some(interval)) => Some(DateOffset {
            unit: parse_unit(unit)?,
            interval,
        }),
        (None, None) => None,
        (unit, interval) => {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!(
                    "Date adjustment unit and interval must both be set (unit: {:?}, interval: {:?})",
                    unit, interval
                ),
            ))
        }
    };
    Ok(Some(DateBoundary { event, offset }))
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, label, weight, is_active, is_current_member, is_reserved,
           rule_kind, start_event, start_event_adjust_unit, start_event_adjust_interval,
           end_event, end_event_adjust_unit, end_event_adjust_interval
    FROM membership_statuses
"#;

#[async_trait]
impl StatusCatalog for PostgresStatusCatalog {
    async fn list(&self) -> Result<Vec<MembershipStatus>, DomainError> {
        let query = format!("{} ORDER BY weight ASC, id ASC", SELECT_COLUMNS);
        let rows: Vec<StatusRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to load membership statuses: {}", e),
                )
            })?;

        rows.into_iter().map(MembershipStatus::try_from).collect()
    }

    async fn find_by_id(
        &self,
        id: MembershipStatusId,
    ) -> Result<Option<MembershipStatus>, DomainError> {
        let query = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<StatusRow> = sqlx::query_as(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to find membership status: {}", e),
                )
            })?;

        row.map(MembershipStatus::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MembershipStatus>, DomainError> {
        let query = format!("{} WHERE LOWER(name) = LOWER($1)", SELECT_COLUMNS);
        let row: Option<StatusRow> = sqlx::query_as(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to find membership status: {}", e),
                )
            })?;

        row.map(MembershipStatus::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_row(name: &str) -> StatusRow {
        StatusRow {
            id: 4,
            name: name.to_string(),
            label: name.to_string(),
            weight: 4,
            is_active: true,
            is_current_member: false,
            is_reserved: true,
            rule_kind: "manual".to_string(),
            start_event: None,
            start_event_adjust_unit: None,
            start_event_adjust_interval: None,
            end_event: None,
            end_event_adjust_unit: None,
            end_event_adjust_interval: None,
        }
    }

    #[test]
    fn parse_event_accepts_all_values() {
        assert_eq!(parse_event("join_date").unwrap(), DateEvent::JoinDate);
        assert_eq!(parse_event("START_DATE").unwrap(), DateEvent::StartDate);
        assert_eq!(parse_event("end_date").unwrap(), DateEvent::EndDate);
        assert!(parse_event("birth_date").is_err());
    }

    #[test]
    fn parse_unit_accepts_all_values() {
        assert_eq!(parse_unit("day").unwrap(), OffsetUnit::Day);
        assert_eq!(parse_unit("Month").unwrap(), OffsetUnit::Month);
        assert_eq!(parse_unit("year").unwrap(), OffsetUnit::Year);
        assert!(parse_unit("week").is_err());
    }

    #[test]
    fn parse_boundary_without_event_is_open() {
        assert_eq!(parse_boundary(None, None, None).unwrap(), None);
        assert_eq!(
            parse_boundary(Some("end_date"), None, None).unwrap(),
            Some(DateBoundary::at(DateEvent::EndDate))
        );
    }

    #[test]
    fn parse_boundary_rejects_half_set_adjustment() {
        let err = parse_boundary(Some("end_date"), Some("month"), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err = parse_boundary(Some("end_date"), None, Some(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn grace_row_with_unit_but_no_interval_fails_to_load() {
        let row = StatusRow {
            id: 2,
            name: "Grace".to_string(),
            label: "Grace".to_string(),
            weight: 2,
            is_active: true,
            is_current_member: true,
            is_reserved: false,
            rule_kind: "date_window".to_string(),
            start_event: Some("end_date".to_string()),
            start_event_adjust_unit: None,
            start_event_adjust_interval: None,
            end_event: Some("end_date".to_string()),
            end_event_adjust_unit: Some("month".to_string()),
            end_event_adjust_interval: None,
        };

        let err = MembershipStatus::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("must both be set"));
    }

    #[test]
    fn manual_row_converts() {
        let status = MembershipStatus::try_from(manual_row("Pending")).unwrap();
        assert!(status.is_manual());
        assert!(status.is_reserved);
    }

    #[test]
    fn grace_row_converts_to_default_grace_rule() {
        let row = StatusRow {
            id: 2,
            name: "Grace".to_string(),
            label: "Grace".to_string(),
            weight: 2,
            is_active: true,
            is_current_member: true,
            is_reserved: false,
            rule_kind: "date_window".to_string(),
            start_event: Some("end_date".to_string()),
            start_event_adjust_unit: None,
            start_event_adjust_interval: None,
            end_event: Some("end_date".to_string()),
            end_event_adjust_unit: Some("month".to_string()),
            end_event_adjust_interval: Some(1),
        };

        let status = MembershipStatus::try_from(row).unwrap();
        let expected = MembershipStatus::default_catalog()
            .into_iter()
            .find(|s| s.name == "Grace")
            .unwrap();
        assert_eq!(status, expected);
    }

    #[test]
    fn date_window_without_start_is_rejected() {
        let mut row = manual_row("Broken");
        row.rule_kind = "date_window".to_string();
        let err = MembershipStatus::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unknown_rule_kind_is_rejected() {
        let mut row = manual_row("Broken");
        row.rule_kind = "formula".to_string();
        assert!(MembershipStatus::try_from(row).is_err());
    }
}

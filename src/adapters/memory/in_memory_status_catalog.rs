//! In-Memory Status Catalog Adapter
//!
//! Holds a fixed status catalog, either the built-in default or one loaded
//! from YAML:
//!
//! ```yaml
//! statuses:
//!   - id: 1
//!     name: Current
//!     label: Current
//!     weight: 1
//!     is_current_member: true
//!     rule:
//!       kind: date_window
//!       start: { event: start_date }
//!       end: { event: end_date }
//!   - id: 6
//!     name: Deceased
//!     label: Deceased
//!     weight: 6
//!     rule: { kind: manual }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipStatusId};
use crate::domain::membership::MembershipStatus;
use crate::ports::StatusCatalog;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    statuses: Vec<MembershipStatus>,
}

/// Read-only status catalog kept in memory.
#[derive(Debug, Clone)]
pub struct InMemoryStatusCatalog {
    statuses: Vec<MembershipStatus>,
}

impl InMemoryStatusCatalog {
    /// Create a catalog from the given statuses.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if two statuses share an id or a name.
    pub fn new(mut statuses: Vec<MembershipStatus>) -> Result<Self, DomainError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for status in &statuses {
            if !ids.insert(status.id) {
                return Err(DomainError::validation(
                    "id",
                    format!("Duplicate membership status id: {}", status.id),
                ));
            }
            if !names.insert(status.name.to_ascii_lowercase()) {
                return Err(DomainError::validation(
                    "name",
                    format!("Duplicate membership status name: {}", status.name),
                ));
            }
        }
        statuses.sort_by_key(|s| (s.weight, s.id));
        Ok(Self { statuses })
    }

    /// The catalog installed by the initial migration.
    pub fn default_catalog() -> Self {
        let mut statuses = MembershipStatus::default_catalog();
        statuses.sort_by_key(|s| (s.weight, s.id));
        Self { statuses }
    }

    /// Parse a catalog from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid status catalog document: {}", e),
            )
        })?;
        Self::new(document.statuses)
    }

    /// Read and parse a catalog YAML file.
    pub async fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to read status catalog {}: {}", path.display(), e),
            )
        })?;
        Self::from_yaml(&yaml)
    }

    /// Number of statuses in the catalog
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[async_trait]
impl StatusCatalog for InMemoryStatusCatalog {
    async fn list(&self) -> Result<Vec<MembershipStatus>, DomainError> {
        Ok(self.statuses.clone())
    }

    async fn find_by_id(
        &self,
        id: MembershipStatusId,
    ) -> Result<Option<MembershipStatus>, DomainError> {
        Ok(self.statuses.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MembershipStatus>, DomainError> {
        Ok(self
            .statuses
            .iter()
            .find(|s| s.has_name(name))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::StatusRule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG_YAML: &str = r#"
statuses:
  - id: 7
    name: Deceased
    label: Deceased
    weight: 9
    is_reserved: true
    rule: { kind: manual }
  - id: 1
    name: Current
    label: Current member
    weight: 1
    is_current_member: true
    rule:
      kind: date_window
      start: { event: start_date }
      end: { event: end_date }
  - id: 2
    name: Grace
    label: Grace
    weight: 2
    is_active: false
    rule:
      kind: date_window
      start: { event: end_date }
      end:
        event: end_date
        offset: { unit: month, interval: 1 }
"#;

    #[tokio::test]
    async fn from_yaml_orders_by_weight() {
        let catalog = InMemoryStatusCatalog::from_yaml(CATALOG_YAML).unwrap();
        let names: Vec<String> = catalog.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Current", "Grace", "Deceased"]);
    }

    #[tokio::test]
    async fn from_yaml_applies_field_defaults() {
        let catalog = InMemoryStatusCatalog::from_yaml(CATALOG_YAML).unwrap();
        let current = catalog.find_by_id(MembershipStatusId::from_raw(1)).await.unwrap().unwrap();
        assert!(current.is_active);
        assert!(!current.is_reserved);

        let grace = catalog.find_by_name("grace").await.unwrap().unwrap();
        assert!(!grace.is_active);

        let deceased = catalog.find_by_name("Deceased").await.unwrap().unwrap();
        assert_eq!(deceased.rule, StatusRule::Manual);
    }

    #[test]
    fn from_yaml_rejects_malformed_documents() {
        let err = InMemoryStatusCatalog::from_yaml("statuses: [ { id: 1 } ]").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_rejects_duplicate_names_ignoring_case() {
        let mut statuses = MembershipStatus::default_catalog();
        let mut duplicate = statuses[0].clone();
        duplicate.id = MembershipStatusId::from_raw(99);
        duplicate.name = duplicate.name.to_uppercase();
        statuses.push(duplicate);

        let err = InMemoryStatusCatalog::new(statuses).unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"name".to_string()));
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let mut statuses = MembershipStatus::default_catalog();
        let mut duplicate = statuses[0].clone();
        duplicate.name = "Other".to_string();
        statuses.push(duplicate);

        let err = InMemoryStatusCatalog::new(statuses).unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"id".to_string()));
    }

    #[tokio::test]
    async fn from_yaml_file_reads_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CATALOG_YAML.as_bytes()).unwrap();

        let catalog = InMemoryStatusCatalog::from_yaml_file(file.path()).await.unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn from_yaml_file_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = InMemoryStatusCatalog::from_yaml_file(dir.path().join("missing.yaml"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn default_catalog_resolves_reserved_names() {
        let catalog = InMemoryStatusCatalog::default_catalog();
        for name in ["Pending", "Cancelled", "Expired", "Deceased"] {
            assert!(catalog.find_by_name(name).await.unwrap().is_some(), "{}", name);
        }
        assert!(catalog.find_by_id(MembershipStatusId::from_raw(42)).await.unwrap().is_none());
    }
}

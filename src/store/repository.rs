//! Typed access to payroll collections.
//!
//! [`PayrollRepository`] converts between the loosely typed documents held
//! by a [`DocumentStore`] and the records in [`crate::models`]. A document
//! that does not decode into its record type is reported as
//! [`StoreError::InvalidDocument`] instead of being read with silent defaults.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::models::{Employee, Project, Signature, Stored, Submission, TimesheetEntry};

use super::{DocumentStore, Filter, ID_FIELD};

/// Collection names used by the service.
pub mod collections {
    /// Projects and their wage templates.
    pub const PROJECT: &str = "project";
    /// Employee directory.
    pub const EMPLOYEE: &str = "employee";
    /// Timesheet entries.
    pub const TIMESHEET_ENTRY: &str = "timesheetentry";
    /// Generated submissions.
    pub const SUBMISSION: &str = "submission";
    /// Submission signatures.
    pub const SIGNATURE: &str = "signature";
}

/// Typed repository over an injected document store.
#[derive(Clone)]
pub struct PayrollRepository {
    store: Arc<dyn DocumentStore>,
}

impl PayrollRepository {
    /// Wraps a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying document store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    async fn insert<T: Serialize>(&self, collection: &str, record: &T) -> StoreResult<String> {
        let document = serde_json::to_value(record)?;
        self.store.create(collection, document).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Vec<Stored<T>>> {
        self.store
            .query(collection, filter)
            .await?
            .into_iter()
            .map(|document| decode(collection, document))
            .collect()
    }

    /// Stores a project.
    pub async fn create_project(&self, project: &Project) -> StoreResult<String> {
        self.insert(collections::PROJECT, project).await
    }

    /// Lists all projects.
    pub async fn list_projects(&self) -> StoreResult<Vec<Stored<Project>>> {
        self.fetch(collections::PROJECT, &Filter::new()).await
    }

    /// Finds a project by id.
    pub async fn find_project(&self, project_id: &str) -> StoreResult<Option<Stored<Project>>> {
        let filter = Filter::new().field(ID_FIELD, project_id);
        Ok(self
            .fetch(collections::PROJECT, &filter)
            .await?
            .into_iter()
            .next())
    }

    /// Stores an employee.
    pub async fn create_employee(&self, employee: &Employee) -> StoreResult<String> {
        self.insert(collections::EMPLOYEE, employee).await
    }

    /// Lists all employees.
    pub async fn list_employees(&self) -> StoreResult<Vec<Stored<Employee>>> {
        self.fetch(collections::EMPLOYEE, &Filter::new()).await
    }

    /// Stores one timesheet entry.
    pub async fn create_timesheet(&self, entry: &TimesheetEntry) -> StoreResult<String> {
        self.insert(collections::TIMESHEET_ENTRY, entry).await
    }

    /// Lists timesheet entries, optionally restricted to a project and/or week.
    pub async fn list_timesheets(
        &self,
        project_id: Option<&str>,
        week_ending: Option<NaiveDate>,
    ) -> StoreResult<Vec<Stored<TimesheetEntry>>> {
        self.fetch(collections::TIMESHEET_ENTRY, &project_week_filter(project_id, week_ending))
            .await
    }

    /// Stores a submission.
    pub async fn create_submission(&self, submission: &Submission) -> StoreResult<String> {
        self.insert(collections::SUBMISSION, submission).await
    }

    /// Finds a submission by id.
    pub async fn find_submission(
        &self,
        submission_id: &str,
    ) -> StoreResult<Option<Stored<Submission>>> {
        let filter = Filter::new().field(ID_FIELD, submission_id);
        Ok(self
            .fetch(collections::SUBMISSION, &filter)
            .await?
            .into_iter()
            .next())
    }

    /// Lists submissions, optionally restricted to a project and/or week.
    pub async fn list_submissions(
        &self,
        project_id: Option<&str>,
        week_ending: Option<NaiveDate>,
    ) -> StoreResult<Vec<Stored<Submission>>> {
        self.fetch(collections::SUBMISSION, &project_week_filter(project_id, week_ending))
            .await
    }

    /// Stores a signature.
    pub async fn create_signature(&self, signature: &Signature) -> StoreResult<String> {
        self.insert(collections::SIGNATURE, signature).await
    }

    /// Lists signatures, optionally for one submission.
    pub async fn list_signatures(
        &self,
        submission_id: Option<&str>,
    ) -> StoreResult<Vec<Stored<Signature>>> {
        let filter = Filter::new().field_opt("submission_id", submission_id);
        self.fetch(collections::SIGNATURE, &filter).await
    }
}

fn project_week_filter(project_id: Option<&str>, week_ending: Option<NaiveDate>) -> Filter {
    Filter::new()
        .field_opt("project_id", project_id)
        .field_opt("week_ending", week_ending.map(|date| date.to_string()))
}

fn decode<T: DeserializeOwned>(collection: &str, document: Value) -> StoreResult<Stored<T>> {
    serde_json::from_value(document).map_err(|err| StoreError::InvalidDocument {
        collection: collection.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WageRate;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn repository() -> (Arc<MemoryStore>, PayrollRepository) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), PayrollRepository::new(store))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(project_id: &str, week_ending: &str) -> TimesheetEntry {
        TimesheetEntry {
            project_id: project_id.to_string(),
            employee_name: "Dana Ruiz".to_string(),
            date: date(week_ending),
            craft: "Electrician".to_string(),
            hours: Decimal::new(8, 0),
            apprentice: false,
            week_ending: date(week_ending),
        }
    }

    #[tokio::test]
    async fn test_project_round_trips_through_store() {
        let (_, repo) = repository();
        let mut project = Project::new("Route 9 Bridge");
        project.wage_templates = vec![WageRate::new("Electrician", Decimal::new(5025, 2))];

        let id = repo.create_project(&project).await.unwrap();
        let stored = repo.find_project(&id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.record, project);
    }

    #[tokio::test]
    async fn test_find_project_unknown_id_is_none() {
        let (_, repo) = repository();
        assert!(repo.find_project("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_timesheets_filters_by_project_and_week() {
        let (_, repo) = repository();
        repo.create_timesheet(&entry("p1", "2026-01-17")).await.unwrap();
        repo.create_timesheet(&entry("p1", "2026-01-24")).await.unwrap();
        repo.create_timesheet(&entry("p2", "2026-01-17")).await.unwrap();

        let week = repo
            .list_timesheets(Some("p1"), Some(date("2026-01-17")))
            .await
            .unwrap();
        assert_eq!(week.len(), 1);

        let project = repo.list_timesheets(Some("p1"), None).await.unwrap();
        assert_eq!(project.len(), 2);

        let all = repo.list_timesheets(None, None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_document_is_reported() {
        let (store, repo) = repository();
        store
            .create(collections::TIMESHEET_ENTRY, json!({"project_id": "p1", "hours": "eight"}))
            .await
            .unwrap();

        let err = repo.list_timesheets(Some("p1"), None).await.unwrap_err();
        match err {
            StoreError::InvalidDocument { collection, .. } => {
                assert_eq!(collection, collections::TIMESHEET_ENTRY);
            }
            other => panic!("Expected InvalidDocument, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_signatures_by_submission() {
        let (_, repo) = repository();
        let now = chrono::Utc::now();
        repo.create_signature(&Signature::statement_of_compliance("s1", "A", "Owner", now))
            .await
            .unwrap();
        repo.create_signature(&Signature::statement_of_compliance("s2", "B", "Owner", now))
            .await
            .unwrap();

        let found = repo.list_signatures(Some("s2")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.signer_name, "B");
    }
}

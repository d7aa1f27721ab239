//! Payroll workflows over the document store.
//!
//! [`PayrollService`] validates incoming records, writes them through the
//! [`PayrollRepository`], and runs submission generation: load the project,
//! load the week's timesheet rows, aggregate, and persist the snapshot.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::calculation::aggregate_wages;
use crate::error::{PayrollError, PayrollResult, StoreError};
use crate::models::{Employee, Project, Signature, Stored, Submission, TimesheetEntry};
use crate::store::PayrollRepository;

/// Application-level payroll operations.
#[derive(Clone)]
pub struct PayrollService {
    repository: PayrollRepository,
}

impl PayrollService {
    /// Creates a service over the given repository.
    pub fn new(repository: PayrollRepository) -> Self {
        Self { repository }
    }

    /// The repository the service writes through.
    pub fn repository(&self) -> &PayrollRepository {
        &self.repository
    }

    /// Validates and stores a project, returning its id.
    pub async fn create_project(&self, project: &Project) -> PayrollResult<String> {
        project.validate()?;
        let id = self.repository.create_project(project).await?;
        info!(project_id = %id, templates = project.wage_templates.len(), "Project created");
        Ok(id)
    }

    /// Lists every project.
    pub async fn list_projects(&self) -> PayrollResult<Vec<Stored<Project>>> {
        Ok(self.repository.list_projects().await?)
    }

    /// Stores an employee directory record, returning its id.
    pub async fn create_employee(&self, employee: &Employee) -> PayrollResult<String> {
        employee.validate()?;
        Ok(self.repository.create_employee(employee).await?)
    }

    /// Lists every employee.
    pub async fn list_employees(&self) -> PayrollResult<Vec<Stored<Employee>>> {
        Ok(self.repository.list_employees().await?)
    }

    /// Validates and stores a single timesheet entry, returning its id.
    pub async fn record_timesheet(&self, entry: &TimesheetEntry) -> PayrollResult<String> {
        entry.validate()?;
        Ok(self.repository.create_timesheet(entry).await?)
    }

    /// Stores a batch of timesheet entries, returning their ids in order.
    ///
    /// Every entry is validated before any is written, so a bad row rejects
    /// the whole batch.
    pub async fn record_timesheets(&self, entries: &[TimesheetEntry]) -> PayrollResult<Vec<String>> {
        for (index, entry) in entries.iter().enumerate() {
            entry.validate().map_err(|err| match err {
                PayrollError::InvalidRecord { field, message } => PayrollError::InvalidRecord {
                    field: format!("entries[{index}].{field}"),
                    message,
                },
                other => other,
            })?;
        }

        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            ids.push(self.repository.create_timesheet(entry).await?);
        }
        info!(inserted = ids.len(), "Timesheet batch stored");
        Ok(ids)
    }

    /// Lists timesheet entries, optionally filtered by project and week.
    pub async fn list_timesheets(
        &self,
        project_id: Option<&str>,
        week_ending: Option<NaiveDate>,
    ) -> PayrollResult<Vec<Stored<TimesheetEntry>>> {
        Ok(self.repository.list_timesheets(project_id, week_ending).await?)
    }

    /// Generates and stores a submission for one project week.
    ///
    /// Fails with `ProjectNotFound` before any computation when the project
    /// id is unknown. Every call writes a new submission, even if one exists
    /// for the same project and week.
    pub async fn generate_submission(
        &self,
        project_id: &str,
        week_ending: NaiveDate,
    ) -> PayrollResult<Stored<Submission>> {
        let project = self
            .repository
            .find_project(project_id)
            .await?
            .ok_or_else(|| PayrollError::ProjectNotFound {
                project_id: project_id.to_string(),
            })?;

        let rows: Vec<TimesheetEntry> = self
            .repository
            .list_timesheets(Some(project_id), Some(week_ending))
            .await?
            .into_iter()
            .map(|stored| stored.record)
            .collect();

        let aggregation = aggregate_wages(&project.record.wage_templates, &rows).inspect_err(|err| {
            warn!(project_id, week_ending = %week_ending, error = %err, "Submission not generated");
        })?;
        if !aggregation.warnings.is_empty() {
            warn!(
                project_id,
                week_ending = %week_ending,
                warnings = aggregation.warnings.len(),
                "Timesheet rows without a wage rate were excluded"
            );
        }

        let submission = Submission::generated(
            project_id,
            week_ending,
            aggregation.totals,
            aggregation.lines,
            aggregation.warnings,
        );
        let id = self.repository.create_submission(&submission).await?;

        info!(
            submission_id = %id,
            project_id,
            week_ending = %week_ending,
            rows = rows.len(),
            gross = %submission.totals.gross,
            "Submission generated"
        );

        self.repository
            .find_submission(&id)
            .await?
            .ok_or_else(|| {
                StoreError::Unavailable {
                    message: format!("submission '{}' was not readable after write", id),
                }
                .into()
            })
    }

    /// Lists submissions, optionally filtered by project and week.
    pub async fn list_submissions(
        &self,
        project_id: Option<&str>,
        week_ending: Option<NaiveDate>,
    ) -> PayrollResult<Vec<Stored<Submission>>> {
        Ok(self.repository.list_submissions(project_id, week_ending).await?)
    }

    /// Records a statement-of-compliance signature and returns its id.
    ///
    /// The submission itself is not modified, and its existence is not
    /// checked.
    pub async fn sign_submission(
        &self,
        submission_id: &str,
        signer_name: &str,
        signer_title: &str,
    ) -> PayrollResult<String> {
        let signature = Signature::statement_of_compliance(
            submission_id,
            signer_name,
            signer_title,
            Utc::now(),
        );
        let id = self.repository.create_signature(&signature).await?;
        info!(signature_id = %id, submission_id, "Submission signed");
        Ok(id)
    }

    /// Lists signatures, optionally for one submission.
    pub async fn list_signatures(
        &self,
        submission_id: Option<&str>,
    ) -> PayrollResult<Vec<Stored<Signature>>> {
        Ok(self.repository.list_signatures(submission_id).await?)
    }
}

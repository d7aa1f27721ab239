//! Signature record for a submission's statement of compliance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of signed statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureType {
    /// The WH-347 statement of compliance.
    #[default]
    StatementOfCompliance,
}

/// An append-only signature attached to a submission by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Id of the signed submission.
    pub submission_id: String,
    /// Name of the signer.
    pub signer_name: String,
    /// Title of the signer.
    pub signer_title: String,
    /// When the statement was signed.
    pub signed_at: DateTime<Utc>,
    /// Kind of statement signed.
    #[serde(rename = "type", default)]
    pub signature_type: SignatureType,
}

impl Signature {
    /// Creates a statement-of-compliance signature stamped with `signed_at`.
    pub fn statement_of_compliance(
        submission_id: impl Into<String>,
        signer_name: impl Into<String>,
        signer_title: impl Into<String>,
        signed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            signer_name: signer_name.into(),
            signer_title: signer_title.into(),
            signed_at,
            signature_type: SignatureType::StatementOfCompliance,
        }
    }
}

//! Diagnosis history records.

use serde::{Deserialize, Serialize};

use sakaya_core::{Category, DiagnosisRecordId};

/// A diagnosis result to be appended to the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiagnosisRecord {
    /// Selected option tokens, one per question, in question order.
    pub answers: Vec<String>,
    pub result: Category,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// A stored diagnosis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub id: DiagnosisRecordId,
    pub answers: Vec<String>,
    pub result: Category,
    pub timestamp: i64,
}

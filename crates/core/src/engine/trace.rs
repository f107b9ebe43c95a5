//! Structured run trace for generated entries.
//!
//! Every generation run produces a chronological record of what the engine
//! did, attached to the entry as metadata so an auditor can see why a
//! posting was produced without re-deriving it. The trace stores operation
//! field *names* only; amounts and identifiers never enter the trace or the
//! process log.

use chrono::{DateTime, Utc};
use libro_shared::types::{CompanyId, RunId};
use serde::{Deserialize, Serialize};

use super::event::EventCode;
use super::operation::OperationData;

/// Severity of a trace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    /// Normal pipeline progress.
    Info,
    /// Unusual but non-fatal observation.
    Warning,
    /// Fatal condition; generation aborted.
    Error,
}

/// One chronological step of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    /// Severity.
    pub level: TraceLevel,
    /// When the step was recorded.
    pub at: DateTime<Utc>,
    /// What happened.
    pub message: String,
}

/// Records the steps of one generation run.
#[derive(Debug)]
pub struct TraceRecorder {
    run_id: RunId,
    started_at: DateTime<Utc>,
    company_id: CompanyId,
    event_code: EventCode,
    field_names: Vec<String>,
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    /// Starts a new run trace.
    #[must_use]
    pub fn start(company_id: CompanyId, event_code: EventCode, operation: &OperationData) -> Self {
        let run_id = RunId::new();
        let field_names = operation.field_names();
        tracing::info!(
            %run_id,
            %company_id,
            %event_code,
            fields = ?field_names,
            "generation run started"
        );
        Self {
            run_id,
            started_at: Utc::now(),
            company_id,
            event_code,
            field_names,
            steps: Vec::new(),
        }
    }

    /// Returns the run identifier.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Records an informational step.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(run_id = %self.run_id, "{message}");
        self.push(TraceLevel::Info, message);
    }

    /// Records a warning step.
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(run_id = %self.run_id, "{message}");
        self.push(TraceLevel::Warning, message);
    }

    /// Records an error step.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(run_id = %self.run_id, "{message}");
        self.push(TraceLevel::Error, message);
    }

    fn push(&mut self, level: TraceLevel, message: String) {
        self.steps.push(TraceStep {
            level,
            at: Utc::now(),
            message,
        });
    }

    /// Closes the trace.
    #[must_use]
    pub fn finish(self) -> GenerationTrace {
        GenerationTrace {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            company_id: self.company_id,
            event_code: self.event_code,
            field_names: self.field_names,
            steps: self.steps,
        }
    }
}

/// The completed, serializable trace of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationTrace {
    /// Run identifier.
    pub run_id: RunId,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Company the run was for.
    pub company_id: CompanyId,
    /// Event type generated.
    pub event_code: EventCode,
    /// Names of the operation-data fields supplied (never their values).
    pub field_names: Vec<String>,
    /// Chronological steps.
    pub steps: Vec<TraceStep>,
}

impl GenerationTrace {
    /// Serializes the trace for the entry's metadata field.
    #[must_use]
    pub fn to_metadata(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

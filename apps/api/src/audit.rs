//! Audit events — one record per batch invocation, success or failure.
//!
//! The pipeline's only obligation is to supply the fields; persistence and
//! querying belong to the external audit sink. Emission here is structured
//! logging under the `audit` target, which the deployment can route wherever
//! it likes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub ts: DateTime<Utc>,
    pub actor: String,
    pub action: &'static str,
    pub success: bool,
    pub duration_ms: u64,
    pub metadata: Value,
}

impl AuditEvent {
    pub fn evaluate(actor: String, success: bool, duration_ms: u64, metadata: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            ts: Utc::now(),
            actor,
            action: "evaluate",
            success,
            duration_ms,
            metadata,
        }
    }
}

/// Best-effort emission: an audit failure must never fail the request.
pub fn emit(event: &AuditEvent) {
    info!(
        target: "audit",
        id = %event.id,
        actor = %event.actor,
        action = event.action,
        success = event.success,
        duration_ms = event.duration_ms,
        metadata = %event.metadata,
        "audit event"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_evaluate_event_carries_required_fields() {
        let event = AuditEvent::evaluate(
            "hr-reviewer".to_string(),
            true,
            1520,
            json!({
                "jd_filename": "jd.pdf",
                "resume_count": 3,
                "resume_filenames": ["a.pdf", "b.docx", "c.pdf"],
                "remark_style": "Professional",
                "weights_sum": 100.0
            }),
        );
        assert_eq!(event.action, "evaluate");
        assert!(event.success);
        assert_eq!(event.duration_ms, 1520);
        assert_eq!(event.metadata["resume_count"], 3);

        let serialized = serde_json::to_value(&event).unwrap();
        for key in ["id", "ts", "actor", "action", "success", "duration_ms", "metadata"] {
            assert!(serialized.get(key).is_some(), "missing audit field {key}");
        }
    }
}

//! Errors raised at the strict-mode façade boundary.

use thiserror::Error;

const DOC_PREVIEW_LIMIT: usize = 200;

/// Raised only when [`crate::repair::RepairMode::Strict`] is in effect and
/// repair could not recover valid JSON. Lax mode never raises this — it
/// falls back to `{}` and records the failure in the report instead.
#[derive(Debug, Error)]
pub enum RepairError {
    #[error("could not decode JSON after {iterations} repair iteration(s): {message} (near {doc_preview:?})")]
    Decode {
        message: String,
        doc_preview: String,
        iterations: u32,
    },
}

impl RepairError {
    pub(crate) fn decode(message: impl Into<String>, doc: &str, iterations: u32) -> Self {
        let doc_preview: String = doc.chars().take(DOC_PREVIEW_LIMIT).collect();
        Self::Decode {
            message: message.into(),
            doc_preview,
            iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_preview_is_truncated() {
        let long = "x".repeat(500);
        let err = RepairError::decode("unexpected token", &long, 3);
        match err {
            RepairError::Decode { doc_preview, .. } => assert_eq!(doc_preview.chars().count(), DOC_PREVIEW_LIMIT),
        }
    }
}

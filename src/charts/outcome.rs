use serde::Serialize;

/// Result of building one panel.
///
/// Failure is localized per chart: a missing column or an empty filtered
/// view skips that panel with a reason while the rest of the dashboard
/// renders normally.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome<T> {
    Rendered { figure: T },
    Skipped { reason: String },
}

impl<T> ChartOutcome<T> {
    pub fn rendered(figure: T) -> Self {
        ChartOutcome::Rendered { figure }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        ChartOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, ChartOutcome::Rendered { .. })
    }

    pub fn figure(&self) -> Option<&T> {
        match self {
            ChartOutcome::Rendered { figure } => Some(figure),
            ChartOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            ChartOutcome::Rendered { .. } => None,
            ChartOutcome::Skipped { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let rendered: ChartOutcome<u32> = ChartOutcome::rendered(7);
        assert!(rendered.is_rendered());
        assert_eq!(rendered.figure(), Some(&7));
        assert_eq!(rendered.skip_reason(), None);

        let skipped: ChartOutcome<u32> = ChartOutcome::skipped("no rows");
        assert!(!skipped.is_rendered());
        assert_eq!(skipped.figure(), None);
        assert_eq!(skipped.skip_reason(), Some("no rows"));
    }

    #[test]
    fn test_outcome_serialization() {
        let skipped: ChartOutcome<u32> = ChartOutcome::skipped("no rows");
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no rows");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResult {
    Success(String),
    Failure(String),
}

/// Tagged recognition result for one input, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub name: String,
    pub result: ItemResult,
}

impl ItemOutcome {
    pub fn success(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: ItemResult::Success(text.into()),
        }
    }

    pub fn failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: ItemResult::Failure(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.result, ItemResult::Failure(_))
    }

    /// Labeled section; never empty even when recognition produced no text.
    pub fn section(&self) -> String {
        match &self.result {
            ItemResult::Success(text) => {
                format!("--- TEXT FROM IMAGE: {} ---\n\n{}", self.name, text)
            }
            ItemResult::Failure(message) => {
                format!("--- ERROR PROCESSING: {} ---\n\n{}", self.name, message)
            }
        }
    }
}

/// Aggregated, per-item labeled text of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionReport {
    text: String,
    sections: usize,
    failures: usize,
}

impl ExtractionReport {
    /// One section per outcome, blank-line separated, trimmed at both ends.
    pub fn from_outcomes(outcomes: &[ItemOutcome]) -> Self {
        let mut text = String::new();
        for outcome in outcomes {
            text.push_str("\n\n");
            text.push_str(&outcome.section());
        }
        Self {
            text: text.trim().to_string(),
            sections: outcomes.len(),
            failures: outcomes.iter().filter(|o| o.is_failure()).count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }

    pub fn success_count(&self) -> usize {
        self.sections - self.failures
    }
}

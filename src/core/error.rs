use thiserror::Error;

/// Raised when a template references variables that have no input.
///
/// `missing_variables` is deduplicated and sorted ascending, so every missing
/// name can be fixed in a single pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Prompt requires inputs for the following variables: {}", .missing_variables.join(", "))]
pub struct PromptVariablesNotFoundError {
    pub missing_variables: Vec<String>,
}

impl PromptVariablesNotFoundError {
    pub fn new(mut missing_variables: Vec<String>) -> Self {
        missing_variables.sort();
        missing_variables.dedup();
        Self { missing_variables }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lists_sorted_names() {
        let error = PromptVariablesNotFoundError::new(vec![
            "zeta".to_string(),
            "alpha".to_string(),
            "zeta".to_string(),
        ]);

        assert_eq!(error.missing_variables, vec!["alpha", "zeta"]);
        assert_eq!(
            error.to_string(),
            "Prompt requires inputs for the following variables: alpha, zeta"
        );
    }
}

//! Script generation request and output models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for script generation.
///
/// All fields are free-form phrases supplied by the caller and substituted
/// into the sentence templates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScriptRequest {
    /// Niche the script is aimed at (e.g. "business growth")
    #[validate(length(min = 1, message = "niche must not be empty"))]
    pub niche: String,
    /// Result the viewer is promised
    #[validate(length(min = 1, message = "benefit must not be empty"))]
    pub benefit: String,
    /// First narration step
    #[validate(length(min = 1, message = "step_one must not be empty"))]
    pub step_one: String,
    /// Second narration step
    #[validate(length(min = 1, message = "step_two must not be empty"))]
    pub step_two: String,
    /// Third narration step
    #[validate(length(min = 1, message = "step_three must not be empty"))]
    pub step_three: String,
}

/// A generated three-beat script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedScript {
    /// Opening hook line
    pub hook: String,
    /// Narration body (all body templates joined)
    pub body: String,
    /// Closing call to action
    pub cta: String,
    /// Full script: hook, body and CTA joined by single spaces
    pub script: String,
    /// Niche the script was generated for
    pub niche: String,
}

impl GeneratedScript {
    /// Assemble the full script string from the three beats.
    pub fn join(hook: &str, body: &str, cta: &str) -> String {
        format!("{} {} {}", hook, body, cta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_request_validation() {
        let request = ScriptRequest {
            niche: "fitness".to_string(),
            benefit: "drop 5kg".to_string(),
            step_one: "a".to_string(),
            step_two: "b".to_string(),
            step_three: "c".to_string(),
        };
        assert!(request.validate().is_ok());

        let empty = ScriptRequest {
            niche: String::new(),
            ..request
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_script_join() {
        assert_eq!(GeneratedScript::join("a.", "b.", "c."), "a. b. c.");
    }
}

use crate::errors::ValidationError;
use crate::Result;

/// Allowed values for a receivable's `actionTaken` field.
pub const ACTION_TAKEN_OPTIONS: &[&str] = &[
    "Emailed",
    "Called",
    "Left Voicemail",
    "Promise to Pay",
    "Payment Plan",
    "Disputed",
    "Sent to Collections",
];

/// Accepts `None` (cleared) or one of [`ACTION_TAKEN_OPTIONS`].
pub fn validate_action_taken(value: Option<&str>) -> Result<()> {
    match value {
        None => Ok(()),
        Some(value) if ACTION_TAKEN_OPTIONS.contains(&value) => Ok(()),
        Some(value) => Err(ValidationError::UnsupportedActionTaken(value.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_action_taken() {
        assert!(validate_action_taken(None).is_ok());
        assert!(validate_action_taken(Some("Called")).is_ok());
        assert!(validate_action_taken(Some("called")).is_err());
        assert!(validate_action_taken(Some("")).is_err());
    }
}

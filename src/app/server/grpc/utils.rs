use crate::app::server::errors::ApiError;

/// Names are free text, trimmed, and must not be empty
pub fn validate_name(name: &str, kind: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest {
            message: format!("The {kind} cannot be empty"),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(validate_name("  standup ", "room name").unwrap(), "standup");
    }

    #[test]
    fn blank_names_are_rejected() {
        let error = validate_name(" \t", "user name").unwrap_err();
        assert_eq!(error.to_string(), "Bad request: The user name cannot be empty");
    }
}

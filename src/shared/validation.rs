//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError, reporting the first failing field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                )
            })
        })
        .collect();

    // HashMap iteration order is unstable
    fields.sort();

    let message = fields
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title must not be empty"))]
        title: String,
    }

    #[test]
    fn test_validation_error_reports_field_and_message() {
        let err = Sample { title: String::new() }.validate().unwrap_err();

        match validation_error(err) {
            AppError::Validation(msg) => assert_eq!(msg, "title: Title must not be empty"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

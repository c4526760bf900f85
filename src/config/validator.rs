use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Structural checks on raw settings. Directive-level validation (unknown
/// generator tags, unknown relationship targets) happens when the schema is
/// compiled; both run before the server accepts a request.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_endpoints(settings) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &crate::config::ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !server.base_path.starts_with('/') {
            errors.push(ValidationError::InvalidValue {
                field: "server.base_path".to_string(),
                reason: "Base path must start with '/'".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_endpoints(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (name, endpoint) in &settings.endpoints {
            if name.is_empty() {
                errors.push(ValidationError::MissingField("endpoints.<name>".to_string()));
                continue;
            }

            if endpoint.settings.identifiable.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("endpoints.{name}._settings.identifiable"),
                    reason: "Identifiable field name must not be empty".to_string(),
                });
            }

            if endpoint.settings.paginate == Some(0) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("endpoints.{name}._settings.paginate"),
                    reason: "Page size must be greater than 0".to_string(),
                });
            }

            for (field, directive) in &endpoint.fields {
                if field.is_empty() {
                    errors.push(ValidationError::MissingField(format!(
                        "endpoints.{name}.<field>"
                    )));
                }
                if directive.is_empty() {
                    errors.push(ValidationError::InvalidValue {
                        field: format!("endpoints.{name}.{field}"),
                        reason: "Directive must not be empty".to_string(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

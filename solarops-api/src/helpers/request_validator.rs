use regex::Regex;
use shared_types::{CreateProjectRequestInput, FieldError};
use std::sync::OnceLock;

pub const MIN_REJECTION_REASON_CHARS: usize = 10;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

/// Check a submission against the creation rules. Every violated field is
/// reported, in form order.
pub fn validate_project_request(input: &CreateProjectRequestInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.service_type.is_none() {
        errors.push(FieldError::new("service_type", "Service type is required"));
    }

    validate_min_length(&mut errors, "client_name", "Client name", &input.client_name, 2);

    if !email_regex().is_match(input.client_email.trim()) {
        errors.push(FieldError::new("client_email", "Client email must be a valid email address"));
    }

    validate_min_length(&mut errors, "client_phone", "Client phone", &input.client_phone, 10);
    validate_min_length(&mut errors, "address", "Address", &input.address, 5);
    validate_min_length(&mut errors, "city", "City", &input.city, 2);
    validate_min_length(&mut errors, "state", "State", &input.state, 2);
    validate_min_length(&mut errors, "zip_code", "Zip code", &input.zip_code, 3);
    validate_min_length(&mut errors, "country", "Country", &input.country, 2);
    validate_min_length(&mut errors, "title", "Title", &input.title, 5);
    validate_min_length(&mut errors, "description", "Description", &input.description, 20);

    if input.property_type.is_none() {
        errors.push(FieldError::new("property_type", "Property type is required"));
    }

    validate_non_negative(&mut errors, "estimated_budget", "Budget", input.estimated_budget);
    validate_non_negative(&mut errors, "system_size_kw", "System size", input.system_size_kw);

    errors
}

/// Rejections must explain themselves.
pub fn validate_rejection_reason(reason: Option<&str>) -> Option<FieldError> {
    let length = reason.map(|r| r.trim().chars().count()).unwrap_or(0);

    if length < MIN_REJECTION_REASON_CHARS {
        return Some(FieldError::new(
            "rejection_reason",
            format!(
                "Rejection reason must be at least {} characters",
                MIN_REJECTION_REASON_CHARS
            ),
        ));
    }

    None
}

fn validate_min_length(
    errors: &mut Vec<FieldError>,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
) {
    if value.trim().chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    }
}

fn validate_non_negative(errors: &mut Vec<FieldError>, field: &str, label: &str, value: Option<f64>) {
    if let Some(value) = value {
        if value.is_nan() || value < 0.0 {
            errors.push(FieldError::new(field, format!("{} cannot be negative", label)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{PropertyType, ServiceType};

    fn valid_input() -> CreateProjectRequestInput {
        CreateProjectRequestInput {
            service_type: Some(ServiceType::Installation),
            client_name: "Jo".to_string(),
            client_email: "jo@example.com".to_string(),
            client_phone: "0123456789".to_string(),
            address: "1 Sun".to_string(),
            city: "Oz".to_string(),
            state: "NS".to_string(),
            zip_code: "200".to_string(),
            country: "AU".to_string(),
            title: "Solar".to_string(),
            description: "a".repeat(20),
            property_type: Some(PropertyType::Commercial),
            estimated_budget: Some(0.0),
            system_size_kw: None,
            desired_timeline: None,
            priority: None,
        }
    }

    #[test]
    fn test_minimum_lengths_are_inclusive() {
        assert!(validate_project_request(&valid_input()).is_empty());
    }

    #[test]
    fn test_short_description() {
        let mut input = valid_input();
        input.description = "too brief".to_string();

        let errors = validate_project_request(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "description");
        assert_eq!(errors[0].message, "Description must be at least 20 characters");
    }

    #[test]
    fn test_all_violations_reported() {
        let errors = validate_project_request(&CreateProjectRequestInput::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec![
                "service_type",
                "client_name",
                "client_email",
                "client_phone",
                "address",
                "city",
                "state",
                "zip_code",
                "country",
                "title",
                "description",
                "property_type",
            ]
        );
    }

    #[test]
    fn test_invalid_email_and_negative_numbers() {
        let mut input = valid_input();
        input.client_email = "jo at example.com".to_string();
        input.estimated_budget = Some(-1.0);
        input.system_size_kw = Some(-0.5);

        let fields: Vec<String> = validate_project_request(&input)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["client_email", "estimated_budget", "system_size_kw"]);
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let mut input = valid_input();
        input.client_name = "  J  ".to_string();

        let errors = validate_project_request(&input);
        assert_eq!(errors[0].field, "client_name");
    }

    #[test]
    fn test_rejection_reason() {
        assert!(validate_rejection_reason(None).is_some());
        assert!(validate_rejection_reason(Some("too short")).is_some());
        assert!(validate_rejection_reason(Some("  too short  ")).is_some());
        assert!(validate_rejection_reason(Some("0123456789")).is_none());
        assert!(validate_rejection_reason(Some("budget too low for scope")).is_none());
    }
}

// Booking form input and per-field validation

use crate::calculator::{quote_stay, CalculatorError, StayQuote};
use crate::catalog::Room;
use crate::session::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

// Inline validation messages keyed by form field, one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    // Keeps the first message reported for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.errors {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookingFormInput {
    #[validate(length(min = 1, message = "Check-in date is required"))]
    pub check_in: String,

    #[validate(length(min = 1, message = "Check-out date is required"))]
    pub check_out: String,

    #[validate(range(min = 1, message = "At least 1 guest required"))]
    pub guests: u32,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,

    pub special_requests: Option<String>,
}

impl BookingFormInput {
    // Default form values: one guest, contact fields taken from the signed-in user
    pub fn prefilled(user: Option<&User>) -> Self {
        let mut input = BookingFormInput {
            guests: 1,
            ..Default::default()
        };

        if let Some(user) = user {
            let mut names = user.name.split(' ');
            input.first_name = names.next().unwrap_or_default().to_string();
            input.last_name = names.next().unwrap_or_default().to_string();
            input.email = user.email.clone();
        }
        input
    }

    fn trimmed(&self) -> Self {
        BookingFormInput {
            check_in: self.check_in.trim().to_string(),
            check_out: self.check_out.trim().to_string(),
            guests: self.guests,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            special_requests: self
                .special_requests
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    // Field checks that need no room: required fields and email format
    pub fn validate_fields(&self) -> Result<(), FieldErrors> {
        self.trimmed().validate().map_err(FieldErrors::from)
    }

    // Full submission check against the selected room. On success returns the
    // normalized input and the stay quote.
    pub fn validate_for(&self, room: &Room) -> Result<(BookingFormInput, StayQuote), FieldErrors> {
        let input = self.trimmed();
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if input.guests > room.capacity {
            errors.add("guests", format!("Maximum {} guests", room.capacity));
        }

        let quote = if errors.contains("check_in") || errors.contains("check_out") {
            None
        } else {
            match quote_stay(room, &input.check_in, &input.check_out) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    add_calculator_error(&mut errors, &e);
                    None
                }
            }
        };

        match quote {
            Some(quote) if errors.is_empty() => Ok((input, quote)),
            _ => Err(errors),
        }
    }
}

fn add_calculator_error(errors: &mut FieldErrors, error: &CalculatorError) {
    errors.add(error.field(), error.field_message());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomCatalog;
    use test_case::test_case;

    fn valid_form() -> BookingFormInput {
        BookingFormInput {
            check_in: "2024-02-15".to_string(),
            check_out: "2024-02-18".to_string(),
            guests: 2,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "+44 20 1234 5678".to_string(),
            special_requests: Some("Early check-in if possible".to_string()),
        }
    }

    #[test]
    fn test_valid_form_produces_quote() {
        let catalog = RoomCatalog::seeded();
        let (input, quote) = valid_form().validate_for(catalog.get("1").unwrap()).unwrap();
        assert_eq!(input.first_name, "John");
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total, 897);
    }

    #[test]
    fn test_missing_fields_are_reported_inline() {
        let form = BookingFormInput {
            guests: 1,
            ..Default::default()
        };
        let errors = form.validate_fields().unwrap_err();

        assert_eq!(errors.get("check_in"), Some("Check-in date is required"));
        assert_eq!(errors.get("check_out"), Some("Check-out date is required"));
        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert_eq!(errors.get("last_name"), Some("Last name is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("guests"));
    }

    #[test]
    fn test_invalid_email() {
        let form = BookingFormInput {
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        let errors = form.validate_fields().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
    }

    #[test_case(0, Some("At least 1 guest required") ; "no guests")]
    #[test_case(1, None ; "single guest")]
    #[test_case(3, None ; "at capacity")]
    #[test_case(4, Some("Maximum 3 guests") ; "over capacity")]
    fn test_guests_bounded_by_room_capacity(guests: u32, expected: Option<&str>) {
        let catalog = RoomCatalog::seeded();
        let premium = catalog.get("3").unwrap();
        let form = BookingFormInput {
            guests,
            ..valid_form()
        };

        match form.validate_for(premium) {
            Ok(_) => assert_eq!(expected, None),
            Err(errors) => assert_eq!(errors.get("guests"), expected),
        }
    }

    #[test]
    fn test_reversed_dates_rejected_on_check_out() {
        let catalog = RoomCatalog::seeded();
        let form = BookingFormInput {
            check_in: "2024-02-18".to_string(),
            check_out: "2024-02-15".to_string(),
            ..valid_form()
        };
        let errors = form.validate_for(catalog.get("1").unwrap()).unwrap_err();
        assert_eq!(errors.get("check_out"), Some("Check-out must be after check-in"));
    }

    #[test]
    fn test_prefill_from_user() {
        let user = User {
            id: "user-1".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
        };
        let form = BookingFormInput::prefilled(Some(&user));
        assert_eq!(form.guests, 1);
        assert_eq!(form.first_name, "Jane");
        assert_eq!(form.last_name, "Smith");
        assert_eq!(form.email, "jane.smith@example.com");

        let anonymous = BookingFormInput::prefilled(None);
        assert_eq!(anonymous.guests, 1);
        assert!(anonymous.email.is_empty());
    }

    #[test]
    fn test_blank_special_requests_are_dropped() {
        let catalog = RoomCatalog::seeded();
        let form = BookingFormInput {
            special_requests: Some("   ".to_string()),
            ..valid_form()
        };
        let (input, _) = form.validate_for(catalog.get("1").unwrap()).unwrap();
        assert_eq!(input.special_requests, None);
    }
}

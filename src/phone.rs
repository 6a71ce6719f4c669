//! Recipient phone-number classification and normalization.

use phonenumber::country;

use crate::domain::ValidationError;

/// Host-provided phone utilities.
///
/// The adapter never interprets phone numbers itself: it asks whether a credential type
/// denotes a phone number, and sends whatever [`normalize`](Self::normalize) returns.
pub trait PhoneNumberUtilities: Send + Sync {
    fn is_phone_credential_type(&self, credential_type: &str) -> bool;

    fn normalize(&self, value: &str) -> Result<String, ValidationError>;
}

#[derive(Debug, Clone)]
/// [`PhoneNumberUtilities`] backed by the `phonenumber` crate, normalizing to E.164.
///
/// Credential types are compared case-insensitively; by default only
/// [`DEFAULT_CREDENTIAL_TYPE`](Self::DEFAULT_CREDENTIAL_TYPE) is accepted.
pub struct E164PhoneUtilities {
    default_region: Option<country::Id>,
    credential_types: Vec<String>,
}

impl E164PhoneUtilities {
    /// Field name reported when the credential value is blank.
    pub const FIELD: &'static str = "phone";

    /// Credential type accepted unless [`credential_types`](Self::credential_types)
    /// replaces the list.
    pub const DEFAULT_CREDENTIAL_TYPE: &'static str = "phone";

    pub fn new(default_region: Option<country::Id>) -> Self {
        Self {
            default_region,
            credential_types: vec![Self::DEFAULT_CREDENTIAL_TYPE.to_owned()],
        }
    }

    /// Replace the accepted credential type names.
    pub fn credential_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credential_types = types.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for E164PhoneUtilities {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PhoneNumberUtilities for E164PhoneUtilities {
    fn is_phone_credential_type(&self, credential_type: &str) -> bool {
        let credential_type = credential_type.trim();
        self.credential_types
            .iter()
            .any(|known| known.eq_ignore_ascii_case(credential_type))
    }

    fn normalize(&self, value: &str) -> Result<String, ValidationError> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(self.default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;

        Ok(phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_phone_credential_types() {
        let utils = E164PhoneUtilities::default();
        assert!(utils.is_phone_credential_type(
            E164PhoneUtilities::DEFAULT_CREDENTIAL_TYPE
        ));
        assert!(utils.is_phone_credential_type("phone"));
        assert!(utils.is_phone_credential_type(" Phone "));
        assert!(!utils.is_phone_credential_type("email"));

        let utils = utils.credential_types(["msisdn", "mobile"]);
        assert!(utils.is_phone_credential_type("MSISDN"));
        assert!(!utils.is_phone_credential_type("phone"));
    }

    #[test]
    fn normalizes_to_e164() {
        let utils = E164PhoneUtilities::default();
        assert_eq!(utils.normalize("+7 925 123-45-67").unwrap(), "+79251234567");
        assert_eq!(utils.normalize(" +79251234567 ").unwrap(), "+79251234567");
    }

    #[test]
    fn uses_default_region_for_national_numbers() {
        let utils = E164PhoneUtilities::new(Some(country::Id::RU));
        assert_eq!(utils.normalize("79251234567").unwrap(), "+79251234567");
    }

    #[test]
    fn rejects_blank_and_garbage() {
        let utils = E164PhoneUtilities::default();
        assert_eq!(
            utils.normalize("  "),
            Err(ValidationError::Empty {
                field: E164PhoneUtilities::FIELD
            })
        );
        assert!(matches!(
            utils.normalize("not-a-number"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }
}

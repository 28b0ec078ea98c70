//! The registration form schema

use super::error::FormError;
use super::rule::RuleDef;
use super::schema::{FieldDef, FormSchema};

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const GENDER: &str = "gender";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const ADDRESS: &str = "address";
pub const COUNTRY: &str = "country";
pub const PROFILE_PICTURE: &str = "profilePicture";
pub const TERMS: &str = "terms";

/// Fields whose values never appear in logs
pub const SECRET_FIELDS: [&str; 2] = [PASSWORD, CONFIRM_PASSWORD];

/// Tunable parts of the registration schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub genders: Vec<String>,
    pub countries: Vec<String>,
    pub min_password_length: usize,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            genders: ["Male", "Female", "Other"].map(String::from).to_vec(),
            countries: ["USA", "Canada", "India"].map(String::from).to_vec(),
            min_password_length: 6,
        }
    }
}

/// Field definitions of the registration form, in display order
pub fn registration_fields(options: &RegistrationOptions) -> Vec<FieldDef> {
    let min = options.min_password_length;
    vec![
        FieldDef::text(FULL_NAME).rule(RuleDef::required("Full Name is required")),
        FieldDef::text(EMAIL)
            .rule(RuleDef::required("Email is required"))
            .rule(RuleDef::email("Invalid email format")),
        FieldDef::text(PHONE)
            .rule(RuleDef::required("Phone number is required"))
            .rule(RuleDef::string_match("^[0-9]+$", "Phone number is invalid")),
        FieldDef::date(DATE_OF_BIRTH).rule(RuleDef::required("Date of birth is required")),
        FieldDef::text(GENDER)
            .rule(RuleDef::required("Gender is required"))
            .rule(RuleDef::one_of(
                options.genders.iter().cloned(),
                format!("Gender must be one of {}", options.genders.join(", ")),
            )),
        FieldDef::text(PASSWORD)
            .rule(RuleDef::required("Password is required"))
            .rule(RuleDef::min_length(
                min,
                format!("Password must be at least {min} characters"),
            )),
        FieldDef::text(CONFIRM_PASSWORD)
            .rule(RuleDef::required("Confirm Password is required"))
            .rule(RuleDef::equals_field(PASSWORD, "Passwords must match")),
        FieldDef::text(ADDRESS).rule(RuleDef::required("Address is required")),
        FieldDef::text(COUNTRY)
            .rule(RuleDef::required("Country is required"))
            .rule(RuleDef::one_of(
                options.countries.iter().cloned(),
                format!("Country must be one of {}", options.countries.join(", ")),
            )),
        FieldDef::file(PROFILE_PICTURE),
        FieldDef::boolean(TERMS).rule(RuleDef::one_of(
            [true],
            "You must accept the terms and conditions",
        )),
    ]
}

/// Build the registration schema
pub fn registration_schema(options: &RegistrationOptions) -> Result<FormSchema, FormError> {
    FormSchema::new(registration_fields(options))
}

//! Field-level validation rules.
//!
//! Each field is checked fail-fast: the first rule that fails produces the
//! message for that field and later rules are skipped. Fields are checked
//! independently, so a single pass accumulates at most one message per field.

use crate::phone;
use crate::types::*;
use regex::Regex;
use std::sync::OnceLock;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const OTP_CODE_LEN: usize = 4;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

/// Validate a person name field (first or last name).
///
/// Rule order matters: an empty value must report "required", not
/// "too short".
pub fn check_name(label: &str, value: Option<&str>) -> Result<String, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err(format!("{label} is required"));
    }
    if value.chars().count() < NAME_MIN {
        return Err(format!("{label} must be at least {NAME_MIN} characters"));
    }
    if value.chars().count() > NAME_MAX {
        return Err(format!("{label} must be less than {NAME_MAX} characters"));
    }
    if !name_re().is_match(value) {
        return Err(format!(
            "{label} can only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    Ok(value.to_string())
}

/// Parse a raw gender input. An empty selection and an unrecognized value
/// report distinct messages.
pub fn check_gender(value: Option<&str>) -> Result<Gender, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err("Please select a gender".into());
    }
    value
        .parse()
        .map_err(|_| "Please select a valid gender".into())
}

/// Validate a residence country code. Only a length floor is enforced at
/// this level; the picker constrains the actual code set.
pub fn check_country(value: Option<&str>) -> Result<String, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err("Residence country is required".into());
    }
    if value.chars().count() < 2 {
        return Err("Please select a valid country".into());
    }
    Ok(value.to_string())
}

pub fn check_email(value: Option<&str>) -> Result<String, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err("Email address is required".into());
    }
    if !email_re().is_match(value) {
        return Err("Please enter a valid email address".into());
    }
    if value.chars().count() > EMAIL_MAX {
        return Err("Email address is too long".into());
    }
    Ok(value.to_string())
}

pub fn check_phone(value: Option<&str>) -> Result<String, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err("Phone number is required".into());
    }
    if !phone::is_plausible(value) {
        return Err("Please enter a valid phone number".into());
    }
    Ok(value.to_string())
}

pub fn check_agreed(value: Option<bool>) -> Result<bool, String> {
    if value != Some(true) {
        return Err("You must agree to the terms and conditions to continue".into());
    }
    Ok(true)
}

/// Parse a raw delivery-method input.
pub fn check_otp_method(value: Option<&str>) -> Result<OtpMethod, String> {
    let missing = || "Please select how you'd like to receive your verification code";
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err(missing().into());
    }
    value.parse().map_err(|_| missing().into())
}

/// Validate the passcode entry. Length and character-class failures
/// produce distinct messages.
pub fn check_otp_code(value: Option<&str>) -> Result<String, String> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err("Verification code is required".into());
    }
    if value.chars().count() != OTP_CODE_LEN {
        return Err(format!(
            "Verification code must be exactly {OTP_CODE_LEN} digits"
        ));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("Verification code must contain only numbers".into());
    }
    Ok(value.to_string())
}

/// Validate the personal/contact step, accumulating at most one message
/// per field.
pub fn validate_step1(draft: &Step1Draft) -> Result<Step1Data, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = collect(&mut errors, "firstName", check_name("First name", draft.first_name.as_deref()));
    let last_name = collect(&mut errors, "lastName", check_name("Last name", draft.last_name.as_deref()));
    let gender = match draft.gender {
        Some(g) => Some(g),
        None => {
            errors.push("gender", "Please select a gender");
            None
        }
    };
    let country = collect(&mut errors, "country", check_country(draft.country.as_deref()));
    let email = collect(&mut errors, "email", check_email(draft.email.as_deref()));
    let phone = collect(&mut errors, "phone", check_phone(draft.phone.as_deref()));
    let agreed = collect(&mut errors, "agreed", check_agreed(draft.agreed));

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields passed, the unwraps below cannot fail.
    Ok(Step1Data {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        gender: gender.unwrap_or(Gender::PreferNotToSay),
        country: country.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        agreed: agreed.unwrap_or_default(),
    })
}

/// Validate the delivery-method step.
pub fn validate_step2(draft: &Step2Draft) -> Result<Step2Data, FieldErrors> {
    match draft.otp_method {
        Some(otp_method) => Ok(Step2Data { otp_method }),
        None => {
            let mut errors = FieldErrors::new();
            errors.push(
                "otpMethod",
                "Please select how you'd like to receive your verification code",
            );
            Err(errors)
        }
    }
}

/// Validate the passcode step.
pub fn validate_step3(draft: &Step3Draft) -> Result<Step3Data, FieldErrors> {
    match check_otp_code(draft.otp_code.as_deref()) {
        Ok(otp_code) => Ok(Step3Data { otp_code }),
        Err(message) => {
            let mut errors = FieldErrors::new();
            errors.push("otpCode", message);
            Err(errors)
        }
    }
}

/// Exhaustive validation of the whole registration: the logical AND of all
/// three step rule sets. Used for final checks only; routing goes through
/// the store.
pub fn validate_complete(
    step1: &Step1Draft,
    step2: &Step2Draft,
    step3: &Step3Draft,
) -> Result<(Step1Data, Step2Data, Step3Data), FieldErrors> {
    let mut errors = FieldErrors::new();

    let d1 = validate_step1(step1).map_err(|e| errors.extend(e)).ok();
    let d2 = validate_step2(step2).map_err(|e| errors.extend(e)).ok();
    let d3 = validate_step3(step3).map_err(|e| errors.extend(e)).ok();

    match (d1, d2, d3) {
        (Some(d1), Some(d2), Some(d3)) => Ok((d1, d2, d3)),
        _ => Err(errors),
    }
}

fn collect<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_step1() -> Step1Draft {
        Step1Draft {
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            gender: Some(Gender::Male),
            country: Some("US".into()),
            email: Some("john@x.com".into()),
            phone: Some("+1234567890".into()),
            agreed: Some(true),
        }
    }

    #[test]
    fn name_rules_apply_in_order() {
        // Empty reports "required", not "too short"
        assert_eq!(
            check_name("First name", Some("")),
            Err("First name is required".into())
        );
        assert_eq!(
            check_name("First name", None),
            Err("First name is required".into())
        );
        assert_eq!(
            check_name("First name", Some("J")),
            Err("First name must be at least 2 characters".into())
        );
        assert_eq!(
            check_name("First name", Some(&"a".repeat(51))),
            Err("First name must be less than 50 characters".into())
        );
        assert_eq!(
            check_name("First name", Some("J0hn")),
            Err("First name can only contain letters, spaces, hyphens, and apostrophes".into())
        );
    }

    #[test]
    fn name_accepts_spaces_hyphens_apostrophes() {
        assert!(check_name("Last name", Some("O'Brien")).is_ok());
        assert!(check_name("Last name", Some("Smith-Jones")).is_ok());
        assert!(check_name("First name", Some("Mary Jane")).is_ok());
        assert!(check_name("First name", Some(&"a".repeat(50))).is_ok());
        assert!(check_name("First name", Some("ab")).is_ok());
    }

    #[test]
    fn gender_empty_and_invalid_report_distinct_messages() {
        assert_eq!(check_gender(None), Err("Please select a gender".into()));
        assert_eq!(check_gender(Some("")), Err("Please select a gender".into()));
        assert_eq!(
            check_gender(Some("unknown")),
            Err("Please select a valid gender".into())
        );
        assert_eq!(check_gender(Some("prefer_not_to_say")), Ok(Gender::PreferNotToSay));
    }

    #[test]
    fn country_enforces_length_floor_only() {
        assert!(check_country(Some("US")).is_ok());
        assert!(check_country(Some("GBR")).is_ok());
        assert_eq!(
            check_country(None),
            Err("Residence country is required".into())
        );
        assert_eq!(
            check_country(Some("X")),
            Err("Please select a valid country".into())
        );
    }

    #[test]
    fn email_rules() {
        assert_eq!(
            check_email(None),
            Err("Email address is required".into())
        );
        assert_eq!(
            check_email(Some("not-an-email")),
            Err("Please enter a valid email address".into())
        );
        assert_eq!(
            check_email(Some("a b@x.com")),
            Err("Please enter a valid email address".into())
        );
        let long_local = format!("{}@example.com", "a".repeat(95));
        assert_eq!(
            check_email(Some(&long_local)),
            Err("Email address is too long".into())
        );
        assert!(check_email(Some("john@x.com")).is_ok());
    }

    #[test]
    fn phone_delegates_to_plausibility_check() {
        assert_eq!(
            check_phone(None),
            Err("Phone number is required".into())
        );
        assert_eq!(
            check_phone(Some("12345")),
            Err("Please enter a valid phone number".into())
        );
        assert!(check_phone(Some("+1234567890")).is_ok());
    }

    #[test]
    fn agreed_must_be_strictly_true() {
        assert!(check_agreed(Some(true)).is_ok());
        assert!(check_agreed(Some(false)).is_err());
        assert!(check_agreed(None).is_err());
    }

    #[test]
    fn otp_code_length_and_digit_failures_are_distinct() {
        assert_eq!(
            check_otp_code(None),
            Err("Verification code is required".into())
        );
        assert_eq!(
            check_otp_code(Some("123")),
            Err("Verification code must be exactly 4 digits".into())
        );
        assert_eq!(
            check_otp_code(Some("12345")),
            Err("Verification code must be exactly 4 digits".into())
        );
        assert_eq!(
            check_otp_code(Some("12a4")),
            Err("Verification code must contain only numbers".into())
        );
        assert_eq!(check_otp_code(Some("0000")), Ok("0000".into()));
        assert_eq!(check_otp_code(Some("9999")), Ok("9999".into()));
    }

    #[test]
    fn valid_step1_passes() {
        let data = validate_step1(&valid_step1()).unwrap();
        assert_eq!(data.first_name, "John");
        assert_eq!(data.gender, Gender::Male);
        assert!(data.agreed);
    }

    #[test]
    fn step1_accumulates_one_message_per_field() {
        let errors = validate_step1(&Step1Draft::default()).unwrap_err();

        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("gender"), Some("Please select a gender"));
        assert_eq!(
            errors.get("agreed"),
            Some("You must agree to the terms and conditions to continue")
        );
    }

    #[test]
    fn step1_single_bad_field_reported_alone() {
        let mut draft = valid_step1();
        draft.email = Some("nope".into());

        let errors = validate_step1(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn step2_requires_method() {
        assert!(validate_step2(&Step2Draft::default()).is_err());
        let data = validate_step2(&Step2Draft {
            otp_method: Some(OtpMethod::Email),
        })
        .unwrap();
        assert_eq!(data.otp_method, OtpMethod::Email);
    }

    #[test]
    fn all_four_digit_codes_pass() {
        for n in [0u16, 1, 42, 1234, 9999] {
            let code = format!("{:04}", n);
            assert!(validate_step3(&Step3Draft {
                otp_code: Some(code)
            })
            .is_ok());
        }
    }

    #[test]
    fn complete_validation_is_the_and_of_all_steps() {
        let ok = validate_complete(
            &valid_step1(),
            &Step2Draft {
                otp_method: Some(OtpMethod::Phone),
            },
            &Step3Draft {
                otp_code: Some("1234".into()),
            },
        );
        assert!(ok.is_ok());

        let errors = validate_complete(
            &valid_step1(),
            &Step2Draft::default(),
            &Step3Draft::default(),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("otpMethod").is_some());
        assert!(errors.get("otpCode").is_some());
    }
}

//! Form data types: partial drafts collected step by step, and their
//! fully validated counterparts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Gender selection for the personal-info step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    /// Wire representation, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the one-time passcode is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpMethod {
    Email,
    Phone,
}

impl OtpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpMethod::Email => "email",
            OtpMethod::Phone => "phone",
        }
    }
}

impl FromStr for OtpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(OtpMethod::Email),
            "phone" => Ok(OtpMethod::Phone),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OtpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partially filled personal/contact info for step 1.
///
/// Every field is optional until validation promotes the draft to
/// [`Step1Data`]. Merging is a pure shallow merge: fields absent from the
/// incoming partial are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step1Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreed: Option<bool>,
}

impl Step1Draft {
    /// Shallow-merge `partial` into `self`, overwriting only fields the
    /// partial actually carries. Idempotent under re-application.
    pub fn merge(&mut self, partial: Step1Draft) {
        if partial.first_name.is_some() {
            self.first_name = partial.first_name;
        }
        if partial.last_name.is_some() {
            self.last_name = partial.last_name;
        }
        if partial.gender.is_some() {
            self.gender = partial.gender;
        }
        if partial.country.is_some() {
            self.country = partial.country;
        }
        if partial.email.is_some() {
            self.email = partial.email;
        }
        if partial.phone.is_some() {
            self.phone = partial.phone;
        }
        if partial.agreed.is_some() {
            self.agreed = partial.agreed;
        }
    }

    /// True once any field has been entered.
    pub fn is_started(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.gender.is_some()
            || self.country.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.agreed.is_some()
    }
}

/// Partially filled OTP delivery selection for step 2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step2Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_method: Option<OtpMethod>,
}

impl Step2Draft {
    pub fn merge(&mut self, partial: Step2Draft) {
        if partial.otp_method.is_some() {
            self.otp_method = partial.otp_method;
        }
    }

    pub fn is_started(&self) -> bool {
        self.otp_method.is_some()
    }
}

/// Partially filled passcode entry for step 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step3Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
}

impl Step3Draft {
    pub fn merge(&mut self, partial: Step3Draft) {
        if partial.otp_code.is_some() {
            self.otp_code = partial.otp_code;
        }
    }

    pub fn is_started(&self) -> bool {
        self.otp_code.is_some()
    }
}

/// Fully validated personal/contact info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step1Data {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub country: String,
    pub email: String,
    pub phone: String,
    pub agreed: bool,
}

/// Fully validated delivery-method selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step2Data {
    pub otp_method: OtpMethod,
}

/// Fully validated passcode entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step3Data {
    pub otp_code: String,
}

/// Per-field validation failures: one message per field, the first rule
/// that failed for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Absorb failures from another rule set, keeping the first message
    /// recorded for any field seen twice.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, message) in other.errors {
            self.errors.entry(field).or_insert(message);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

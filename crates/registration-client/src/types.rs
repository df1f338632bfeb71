//! Wire types for the registration backend.

use serde::{Deserialize, Serialize};
use signup_validation::{Gender, OtpMethod, Step1Data};

/// Body of `POST /request-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpRequest {
    pub method: OtpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RequestOtpRequest {
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            method: OtpMethod::Email,
            email: Some(address.into()),
            phone: None,
        }
    }

    pub fn phone(number: impl Into<String>) -> Self {
        Self {
            method: OtpMethod::Phone,
            email: None,
            phone: Some(number.into()),
        }
    }
}

/// Response of `POST /request-otp`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestOtpResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Registrant details carried alongside the OTP on verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub country: String,
    pub email: String,
    pub phone: String,
    pub agreed: bool,
}

impl From<&Step1Data> for UserData {
    fn from(data: &Step1Data) -> Self {
        Self {
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            gender: data.gender,
            country: data.country.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            agreed: data.agreed,
        }
    }
}

/// Body of `POST /verify-otp`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub otp: String,
    pub user_data: UserData,
}

/// Response of `POST /verify-otp`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// JSON error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

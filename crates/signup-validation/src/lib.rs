//! Validation rules for the multi-step signup flow.
//!
//! Pure, side-effect-free checks: each field reports the first rule it
//! fails, and a step validates into a fully typed data struct only when
//! every field passes.

pub mod country;
pub mod phone;
mod rules;
mod types;

pub use rules::{
    check_agreed, check_country, check_email, check_gender, check_name, check_otp_code,
    check_otp_method, check_phone, validate_complete, validate_step1, validate_step2,
    validate_step3,
};
pub use types::*;

//! State slices held by the registration store.
//!
//! `NavigationState`, `DataSlices` and `ApiState` cross the persistence
//! boundary; `UiState` and `EnvironmentConfig` deliberately do not derive
//! `Serialize` so transient and environment state can never end up in a
//! snapshot.

use serde::{Deserialize, Serialize};
use signup_validation::{OtpMethod, Step1Draft, Step2Draft, Step3Draft};
use std::collections::BTreeMap;

/// Number of form steps in the flow.
pub const TOTAL_STEPS: u8 = 3;

/// Cooldown after an OTP send during which resend stays disabled.
pub const RESEND_COOLDOWN_MS: i64 = 60_000;

/// Default mock backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://demo3975834.mockable.io";

/// Position within the multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Current step, kept within `1..=total_steps` by the store actions.
    pub current_step: u8,
    pub total_steps: u8,
    /// Gate for forward navigation, driven by form validation.
    pub can_go_next: bool,
    pub can_go_back: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_step: 1,
            total_steps: TOTAL_STEPS,
            can_go_next: false,
            can_go_back: false,
        }
    }
}

/// Per-step form drafts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSlices {
    #[serde(default)]
    pub step1: Step1Draft,
    #[serde(default)]
    pub step2: Step2Draft,
    #[serde(default)]
    pub step3: Step3Draft,
}

/// Submission lifecycle of the whole flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Named in-flight operations, each with its own loading flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingOp {
    RequestingOtp,
    VerifyingOtp,
    RegisteringUser,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingStates {
    pub requesting_otp: bool,
    pub verifying_otp: bool,
    pub registering_user: bool,
}

impl LoadingStates {
    pub fn get(&self, op: LoadingOp) -> bool {
        match op {
            LoadingOp::RequestingOtp => self.requesting_otp,
            LoadingOp::VerifyingOtp => self.verifying_otp,
            LoadingOp::RegisteringUser => self.registering_user,
        }
    }

    pub fn set(&mut self, op: LoadingOp, loading: bool) {
        match op {
            LoadingOp::RequestingOtp => self.requesting_otp = loading,
            LoadingOp::VerifyingOtp => self.verifying_otp = loading,
            LoadingOp::RegisteringUser => self.registering_user = loading,
        }
    }

    pub fn any(&self) -> bool {
        self.requesting_otp || self.verifying_otp || self.registering_user
    }
}

/// Transient UI state. Never persisted.
///
/// Local validation `errors` and server-originated `api_errors` are kept in
/// separate maps so the two can never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub is_loading: bool,
    pub errors: BTreeMap<String, String>,
    pub api_errors: BTreeMap<String, String>,
    pub submit_status: SubmitStatus,
    pub loading: LoadingStates,
}

/// Progress of the backend interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiState {
    pub otp_requested: bool,
    pub otp_verified: bool,
    pub user_registered: bool,
    #[serde(default)]
    pub selected_otp_method: Option<OtpMethod>,
    /// Epoch milliseconds of the last OTP send.
    #[serde(default)]
    pub otp_request_timestamp: Option<i64>,
    pub can_resend_otp: bool,
}

/// API endpoint configuration, read once at store creation. Never
/// persisted, survives `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub is_production: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            is_production: false,
        }
    }
}

/// Which screen of the flow is visible. Derived from the store in exactly
/// one place; components never reconstruct it from individual flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PersonalInfo,
    MethodSelection,
    OtpEntry,
    Success,
}

/// Step-completion summary for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed_steps: u8,
    pub total_steps: u8,
    pub percent: f32,
}

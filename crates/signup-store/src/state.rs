//! The registration state and its action surface.
//!
//! Every mutation goes through one of the action methods below; each call
//! fully applies before the next is processed, so callers observe
//! all-or-nothing slice updates.

use crate::types::*;
use chrono::Utc;
use signup_validation::{OtpMethod, Step1Draft, Step2Draft, Step3Draft};

/// Complete registration flow state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub navigation: NavigationState,
    pub data: DataSlices,
    pub ui: UiState,
    pub api: ApiState,
    pub environment: EnvironmentConfig,
}

impl StoreState {
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    // Navigation actions

    /// Jump to a step, clamped into `[1, total_steps]`. Forward navigation
    /// is not auto-validated; callers gate on `can_go_next`.
    pub fn set_step(&mut self, step: u8) {
        self.navigation.current_step = step.clamp(1, self.navigation.total_steps);
        self.navigation.can_go_back = self.navigation.current_step > 1;
        // can_go_next is managed separately from form validation
    }

    /// Advance one step when validation has opened the gate.
    pub fn next_step(&mut self) {
        if self.navigation.can_go_next && self.navigation.current_step < self.navigation.total_steps
        {
            self.navigation.current_step += 1;
            self.navigation.can_go_back = true;
            // Closed again until the new step validates
            self.navigation.can_go_next = false;
        }
    }

    /// Go back one step. Earlier steps were already validated, so forward
    /// navigation reopens.
    pub fn prev_step(&mut self) {
        if self.navigation.current_step > 1 {
            self.navigation.current_step -= 1;
            self.navigation.can_go_back = self.navigation.current_step > 1;
            self.navigation.can_go_next = true;
        }
    }

    pub fn reset_navigation(&mut self) {
        self.navigation = NavigationState::default();
    }

    pub fn update_can_go_next(&mut self, can_go: bool) {
        self.navigation.can_go_next = can_go;
    }

    pub fn update_can_go_back(&mut self, can_go: bool) {
        self.navigation.can_go_back = can_go;
    }

    // Data actions

    /// Shallow-merge a partial into the step-1 slice, preserving fields the
    /// partial does not carry.
    pub fn update_step1_data(&mut self, partial: Step1Draft) {
        self.data.step1.merge(partial);
    }

    pub fn update_step2_data(&mut self, partial: Step2Draft) {
        self.data.step2.merge(partial);
    }

    pub fn update_step3_data(&mut self, partial: Step3Draft) {
        self.data.step3.merge(partial);
    }

    pub fn clear_form_data(&mut self) {
        self.data = DataSlices::default();
    }

    // UI actions

    pub fn set_loading(&mut self, loading: bool) {
        self.ui.is_loading = loading;
    }

    pub fn set_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.ui.errors.insert(key.into(), message.into());
    }

    pub fn clear_error(&mut self, key: &str) {
        self.ui.errors.remove(key);
    }

    pub fn clear_errors(&mut self) {
        self.ui.errors.clear();
    }

    pub fn set_submit_status(&mut self, status: SubmitStatus) {
        self.ui.submit_status = status;
    }

    /// Record a server-originated failure without touching local validation
    /// errors.
    pub fn set_api_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.ui.api_errors.insert(key.into(), message.into());
    }

    pub fn clear_api_errors(&mut self) {
        self.ui.api_errors.clear();
    }

    pub fn set_loading_state(&mut self, op: LoadingOp, loading: bool) {
        self.ui.loading.set(op, loading);
    }

    // API state actions

    /// Mark the OTP as requested. Requesting stamps the send time and
    /// starts the resend cooldown.
    pub fn set_otp_requested(&mut self, requested: bool) {
        self.api.otp_requested = requested;
        if requested {
            self.api.otp_request_timestamp = Some(Utc::now().timestamp_millis());
            self.api.can_resend_otp = false;
        }
    }

    pub fn set_otp_verified(&mut self, verified: bool) {
        self.api.otp_verified = verified;
    }

    pub fn set_user_registered(&mut self, registered: bool) {
        self.api.user_registered = registered;
    }

    pub fn set_selected_otp_method(&mut self, method: Option<OtpMethod>) {
        self.api.selected_otp_method = method;
    }

    pub fn set_otp_request_timestamp(&mut self, timestamp: Option<i64>) {
        self.api.otp_request_timestamp = timestamp;
    }

    /// Recompute the resend gate from the send timestamp. The store does
    /// not self-schedule; callers invoke this on a tick.
    pub fn update_can_resend_otp(&mut self) {
        if let Some(ts) = self.api.otp_request_timestamp {
            self.api.can_resend_otp = Utc::now().timestamp_millis() - ts > RESEND_COOLDOWN_MS;
        }
    }

    pub fn reset_api_states(&mut self) {
        self.api = ApiState::default();
    }

    // Environment actions

    pub fn set_api_base_url(&mut self, url: impl Into<String>) {
        self.environment.api_base_url = url.into();
    }

    /// Absolute URL for an endpoint, normalizing the leading slash.
    pub fn api_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.environment.api_base_url, endpoint)
        } else {
            format!("{}/{}", self.environment.api_base_url, endpoint)
        }
    }

    // Transitions and derived state

    /// Leave passcode entry and return to delivery-method selection:
    /// forgets the request, the entered code and any server errors.
    pub fn back_to_method_selection(&mut self) {
        self.api.otp_requested = false;
        self.data.step3 = Step3Draft::default();
        self.clear_api_errors();
    }

    /// The visible screen, derived from navigation and API state. Anything
    /// out of range falls back to the personal-info form.
    pub fn screen(&self) -> Screen {
        if self.api.user_registered {
            return Screen::Success;
        }
        match (self.navigation.current_step, self.api.otp_requested) {
            (1, _) => Screen::PersonalInfo,
            (2, false) => Screen::MethodSelection,
            (2, true) | (3, _) => Screen::OtpEntry,
            _ => Screen::PersonalInfo,
        }
    }

    pub fn is_any_loading(&self) -> bool {
        self.ui.loading.any()
    }

    pub fn has_errors(&self) -> bool {
        !self.ui.errors.is_empty() || !self.ui.api_errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.ui.is_loading || self.ui.submit_status == SubmitStatus::Pending
    }

    /// Delivery method and the contact it routes to, once both are known.
    pub fn selected_contact(&self) -> Option<(OtpMethod, String)> {
        match self.api.selected_otp_method? {
            OtpMethod::Email => Some((OtpMethod::Email, self.data.step1.email.clone()?)),
            OtpMethod::Phone => Some((OtpMethod::Phone, self.data.step1.phone.clone()?)),
        }
    }

    /// Step-completion summary for progress indicators. A step counts once
    /// any of its fields has been entered.
    pub fn progress(&self) -> Progress {
        let completed_steps = [
            self.data.step1.is_started(),
            self.data.step2.is_started(),
            self.data.step3.is_started(),
        ]
        .iter()
        .filter(|started| **started)
        .count() as u8;

        Progress {
            completed_steps,
            total_steps: self.navigation.total_steps,
            percent: f32::from(completed_steps) / f32::from(self.navigation.total_steps) * 100.0,
        }
    }

    /// Start-over operation: every slice returns to its initial value
    /// except the environment config.
    pub fn reset(&mut self) {
        self.navigation = NavigationState::default();
        self.data = DataSlices::default();
        self.ui = UiState::default();
        self.api = ApiState::default();
        // Environment config is deliberately kept
    }
}

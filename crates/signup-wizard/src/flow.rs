//! Mutation-boundary operations tying the store and the API client.
//!
//! Every client failure is caught here and turned into store state; nothing
//! propagates past this boundary. Loading flags reset on settlement whether
//! the call succeeded or not, and no operation retries on its own.

use registration_client::{
    ApiError, RegistrationClient, RequestOtpRequest, UserData, VerifyOtpRequest,
};
use signup_store::{LoadingOp, SignupStore, SubmitStatus};
use signup_validation::{validate_step1, validate_step3, OtpMethod, Step1Draft, Step3Draft};
use tracing::{debug, info, warn};

/// Validate and commit the personal-info step. On success the flow
/// advances to delivery-method selection; on failure the field errors land
/// in the local-error map and the step stays put.
pub async fn submit_personal_info(store: &SignupStore, partial: Step1Draft) -> bool {
    store.update(|s| s.update_step1_data(partial)).await;
    let draft = store.read(|s| s.data.step1.clone()).await;

    match validate_step1(&draft) {
        Ok(_) => {
            store
                .update(|s| {
                    s.clear_errors();
                    s.update_can_go_next(true);
                    s.next_step();
                })
                .await;
            persist(store).await;
            debug!("Personal info accepted, advancing to method selection");
            true
        }
        Err(errors) => {
            store
                .update(|s| {
                    s.clear_errors();
                    for (field, message) in errors.iter() {
                        s.set_error(field, message);
                    }
                    s.update_can_go_next(false);
                })
                .await;
            false
        }
    }
}

/// Request an OTP to the chosen channel. The contact comes from the
/// validated step-1 data; the selected method is recorded before the call
/// so the entry screen can show where the code went.
pub async fn request_otp(store: &SignupStore, client: &RegistrationClient, method: OtpMethod) -> bool {
    let contact = store
        .read(|s| match method {
            OtpMethod::Email => s.data.step1.email.clone(),
            OtpMethod::Phone => s.data.step1.phone.clone(),
        })
        .await;

    let Some(contact) = contact else {
        store
            .update(|s| s.set_api_error("otp", "Contact details are missing - complete the first step"))
            .await;
        return false;
    };

    store
        .update(|s| {
            s.clear_api_errors();
            s.set_loading_state(LoadingOp::RequestingOtp, true);
            s.set_selected_otp_method(Some(method));
            // A fresh code invalidates any earlier verification
            s.set_otp_verified(false);
        })
        .await;

    let request = match method {
        OtpMethod::Email => RequestOtpRequest::email(contact),
        OtpMethod::Phone => RequestOtpRequest::phone(contact),
    };

    let succeeded = match client.request_otp(&request).await {
        Ok(response) => {
            info!(message = %response.message, "OTP request accepted");
            store.update(|s| s.set_otp_requested(true)).await;
            true
        }
        Err(e) => {
            warn!("OTP request failed: {}", e);
            let message = match &e {
                ApiError::Api { .. } | ApiError::Timeout => e.to_string(),
                _ => "Failed to request OTP. Please try again.".into(),
            };
            store.update(|s| s.set_api_error("otp", message)).await;
            false
        }
    };

    // Loading flag resets on settlement regardless of outcome
    store
        .update(|s| s.set_loading_state(LoadingOp::RequestingOtp, false))
        .await;
    persist(store).await;
    succeeded
}

/// Re-send the OTP over the previously selected channel. Keeps
/// `otp_requested` true so the entry screen stays up.
pub async fn resend_otp(store: &SignupStore, client: &RegistrationClient) -> bool {
    let Some(method) = store.read(|s| s.api.selected_otp_method).await else {
        return false;
    };

    store
        .update(|s| {
            s.set_otp_verified(false);
            s.clear_api_errors();
        })
        .await;

    request_otp(store, client, method).await
}

/// Verify the entered passcode and complete registration.
pub async fn verify_and_register(store: &SignupStore, client: &RegistrationClient, code: &str) -> bool {
    store
        .update(|s| {
            s.update_step3_data(Step3Draft {
                otp_code: Some(code.to_string()),
            })
        })
        .await;

    let draft = store.read(|s| s.data.step3.clone()).await;
    let step3 = match validate_step3(&draft) {
        Ok(data) => data,
        Err(errors) => {
            store
                .update(|s| {
                    for (field, message) in errors.iter() {
                        s.set_error(field, message);
                    }
                })
                .await;
            return false;
        }
    };

    let step1_draft = store.read(|s| s.data.step1.clone()).await;
    let step1 = match validate_step1(&step1_draft) {
        Ok(data) => data,
        Err(_) => {
            store
                .update(|s| {
                    s.set_api_error("verify", "Personal details are incomplete - start over from the first step")
                })
                .await;
            return false;
        }
    };

    store
        .update(|s| {
            s.clear_api_errors();
            s.clear_error("otpCode");
            s.set_loading_state(LoadingOp::VerifyingOtp, true);
            s.set_loading_state(LoadingOp::RegisteringUser, true);
            s.set_submit_status(SubmitStatus::Pending);
            s.set_otp_verified(false);
            s.set_user_registered(false);
        })
        .await;

    let request = VerifyOtpRequest {
        otp: step3.otp_code,
        user_data: UserData::from(&step1),
    };

    let succeeded = match client.verify_otp_and_register(&request).await {
        Ok(response) if response.success => {
            info!(user_id = ?response.user_id, "Registration completed");
            store
                .update(|s| {
                    s.set_otp_verified(true);
                    s.set_user_registered(true);
                    s.set_submit_status(SubmitStatus::Success);
                    s.set_step(3);
                })
                .await;
            true
        }
        Ok(response) => {
            // 2xx without the success flag still counts as a failure
            let message = if response.message.is_empty() {
                "Verification failed".to_string()
            } else {
                response.message
            };
            store
                .update(|s| {
                    s.set_api_error("verify", message);
                    s.set_submit_status(SubmitStatus::Error);
                })
                .await;
            false
        }
        Err(e) => {
            warn!("OTP verification failed: {}", e);
            let message = match &e {
                ApiError::Api {
                    error_code: Some(code),
                    ..
                } if code == "INVALID_OTP" => {
                    "Invalid OTP code. Please check and try again.".to_string()
                }
                ApiError::Api { status: 400, .. } => "Invalid OTP code. Please try again.".to_string(),
                ApiError::Api { .. } | ApiError::Timeout => e.to_string(),
                _ => "Verification failed. Please try again.".to_string(),
            };
            store
                .update(|s| {
                    s.set_api_error("verify", message);
                    s.set_submit_status(SubmitStatus::Error);
                })
                .await;
            false
        }
    };

    store
        .update(|s| {
            s.set_loading_state(LoadingOp::VerifyingOtp, false);
            s.set_loading_state(LoadingOp::RegisteringUser, false);
        })
        .await;
    persist(store).await;
    succeeded
}

/// Leave passcode entry and return to method selection.
pub async fn back_to_method_selection(store: &SignupStore) {
    store.update(|s| s.back_to_method_selection()).await;
    persist(store).await;
}

/// Snapshot failures are logged, never surfaced to the flow.
async fn persist(store: &SignupStore) {
    if let Err(e) = store.save().await {
        warn!("Failed to persist snapshot: {}", e);
    }
}

//! Behavior tests for the registration client against a mock HTTP server.

use registration_client::{
    ApiError, RegistrationClient, RequestOtpRequest, UserData, VerifyOtpRequest,
};
use signup_validation::Gender;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RegistrationClient {
    RegistrationClient::new(server.uri())
        .unwrap()
        .without_artificial_delay()
}

fn user_data() -> UserData {
    UserData {
        first_name: "John".into(),
        last_name: "Doe".into(),
        gender: Gender::Male,
        country: "US".into(),
        email: "john@x.com".into(),
        phone: "+1234567890".into(),
        agreed: true,
    }
}

#[tokio::test]
async fn request_otp_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request-otp"))
        .and(body_partial_json(serde_json::json!({
            "method": "email",
            "email": "a@b.com",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "OTP sent successfully",
            "timestamp": "2024-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .request_otp(&RequestOtpRequest::email("a@b.com"))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "OTP sent successfully");
}

#[tokio::test]
async fn multibyte_success_body_survives_debug_logging() {
    let server = MockServer::start().await;
    // Long enough that the logged excerpt cuts inside the body, with
    // two-byte characters straddling the cut
    let message = format!("Código enviado {}", "é".repeat(150));
    Mock::given(method("POST"))
        .and(path("/request-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": message,
            "timestamp": "2024-01-01T00:00:00Z",
        })))
        .mount(&server)
        .await;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let response = client_for(&server)
        .request_otp(&RequestOtpRequest::email("a@b.com"))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, message);
}

#[tokio::test]
async fn request_otp_server_error_body_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request-otp"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "Delivery provider unavailable",
            "errorCode": "DELIVERY_FAILED",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .request_otp(&RequestOtpRequest::phone("+1234567890"))
        .await
        .unwrap_err();

    match err {
        ApiError::Api {
            status,
            error_code,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error_code.as_deref(), Some("DELIVERY_FAILED"));
            assert_eq!(message, "Delivery provider unavailable");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_error_body_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request-otp"))
        .respond_with(ResponseTemplate::new(503).set_body_string("oops"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .request_otp(&RequestOtpRequest::email("a@b.com"))
        .await
        .unwrap_err();

    match err {
        ApiError::Api {
            status,
            error_code,
            message,
        } => {
            assert_eq!(status, 503);
            assert!(error_code.is_none());
            assert_eq!(message, "HTTP error! status: 503");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn valid_otp_verifies_and_registers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify-otp"))
        .and(body_partial_json(serde_json::json!({
            "otp": "1234",
            "userData": { "firstName": "John", "gender": "male" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Registration completed successfully",
            "userId": "user_12345",
            "registrationDate": "2024-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .verify_otp_and_register(&VerifyOtpRequest {
            otp: "1234".into(),
            user_data: user_data(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "Registration completed successfully");
    assert_eq!(response.user_id.as_deref(), Some("user_12345"));
}

#[tokio::test]
async fn invalid_otp_is_rejected_without_calling_the_server() {
    let server = MockServer::start().await;
    // No mock mounted on purpose: the request must never reach the server.
    Mock::given(method("POST"))
        .and(path("/verify-otp"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .verify_otp_and_register(&VerifyOtpRequest {
            otp: "0000".into(),
            user_data: user_data(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.error_code(), Some("INVALID_OTP"));
}

#[tokio::test]
async fn slow_server_surfaces_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request-otp"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(serde_json::json!({
                    "success": true,
                    "message": "OTP sent successfully",
                    "timestamp": "2024-01-01T00:00:00Z",
                })),
        )
        .mount(&server)
        .await;

    let client = RegistrationClient::with_timeout(server.uri(), Duration::from_millis(100))
        .unwrap()
        .without_artificial_delay();

    let err = client
        .request_otp(&RequestOtpRequest::email("a@b.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout));
    assert_eq!(err.to_string(), "Request timeout - please try again");
}

#[tokio::test]
async fn health_check_reflects_backend_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client_for(&server).health_check().await);

    let unreachable = RegistrationClient::new("http://127.0.0.1:1")
        .unwrap()
        .without_artificial_delay();
    assert!(!unreachable.health_check().await);
}

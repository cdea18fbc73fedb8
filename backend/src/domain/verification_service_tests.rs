//! Tests for the verification workflow.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{
    DisplayName, EmailAddress, ErrorCode, PasswordHash, UserAccount, UserId, UserRole,
    VerificationPin, VerificationState,
};

fn account(verification: VerificationState) -> UserAccount {
    UserAccount {
        id: UserId::random(),
        display_name: DisplayName::new("A").expect("name"),
        email: EmailAddress::new("a@x.com").expect("email"),
        password_hash: PasswordHash::new("hash"),
        role: UserRole::Individual,
        verification,
        created_at: Utc::now(),
    }
}

fn pending() -> VerificationState {
    VerificationState::Pending {
        pin: VerificationPin::from_code(4821).expect("valid pin"),
    }
}

fn submission(pin: &str) -> PinSubmission {
    PinSubmission::try_from_parts(Some("A@x.com"), Some(pin)).expect("valid submission")
}

#[tokio::test]
async fn verify_confirms_matching_pin() {
    let stored = account(pending());
    let expected_id = stored.id;
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email.as_ref() == "a@x.com")
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_confirm_verification()
        .withf(move |id, pin| *id == expected_id && pin.as_str() == "4821")
        .times(1)
        .return_once(|_, _| Ok(true));

    VerificationService::new(Arc::new(repo))
        .verify(&submission("4821"))
        .await
        .expect("verification succeeds");
}

#[rstest]
#[case("4822")]
#[case(" 4821")]
#[case("")]
#[tokio::test]
async fn verify_rejects_non_matching_pin(#[case] pin: &str) {
    let stored = account(pending());
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_confirm_verification().times(0);

    let err = VerificationService::new(Arc::new(repo))
        .verify(&submission(pin))
        .await
        .expect_err("wrong pin");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), "Invalid PIN.");
}

#[tokio::test]
async fn verify_rejects_already_verified_account() {
    let stored = account(VerificationState::Verified);
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_confirm_verification().times(0);

    let err = VerificationService::new(Arc::new(repo))
        .verify(&submission("4821"))
        .await
        .expect_err("no pin left");
    assert_eq!(err.message(), "Invalid PIN.");
}

#[tokio::test]
async fn verify_loses_race_when_conditional_update_misses() {
    let stored = account(pending());
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_confirm_verification()
        .return_once(|_, _| Ok(false));

    let err = VerificationService::new(Arc::new(repo))
        .verify(&submission("4821"))
        .await
        .expect_err("concurrent verification won");
    assert_eq!(err.message(), "Invalid PIN.");
}

#[tokio::test]
async fn verify_reports_unknown_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));

    let err = VerificationService::new(Arc::new(repo))
        .verify(&submission("4821"))
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), "User does not exist.");
}

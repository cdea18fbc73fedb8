//! End-to-end account and food workflow through the HTTP layer, backed by the
//! in-memory adapters from `foodshare::test_support`.

use actix_web::http::StatusCode;
use foodshare::domain::VerificationState;
use foodshare::domain::ports::TokenIssuer;
use foodshare::test_support::{TEST_PIN, TestHarness};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}

#[rstest]
#[actix_rt::test]
async fn signup_verify_login_then_trade_food(harness: TestHarness) {
    // Signup creates exactly one pending record with a four-digit PIN.
    let (status, body) = harness
        .post_json(
            "/auth/signup",
            json!({ "name": "A", "email": "a@x.com", "password": "p", "userType": "individual" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let accounts = harness.users.accounts();
    assert_eq!(accounts.len(), 1);
    let pin = accounts[0].pending_pin().expect("pending pin").as_str().to_owned();
    assert_eq!(pin.len(), 4);
    assert_eq!(pin, TEST_PIN.to_string());

    // A wrong PIN is rejected and leaves the record pending.
    let (status, body) = harness
        .post_json("/auth/verify", json!({ "email": "a@x.com", "pin": "1111" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).starts_with("Invalid PIN"));

    // The mailed PIN verifies the record and is cleared.
    let (status, body) = harness
        .post_json("/auth/verify", json!({ "email": "a@x.com", "pin": pin }), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(message(&body), "Email verified successfully.");
    let account = harness.users.account_for("a@x.com").expect("account");
    assert_eq!(account.verification, VerificationState::Verified);
    assert!(account.pending_pin().is_none());

    // Login returns a token naming the record and its role.
    let (status, body) = harness
        .post_json("/auth/login", json!({ "email": "a@x.com", "password": "p" }), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["userType"], json!("individual"));
    let token = body["token"].as_str().expect("token").to_owned();
    let claims = harness.tokens.verify(&token).expect("token verifies");
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.iat, harness.clock.utc().timestamp());
    assert_eq!(claims.exp - claims.iat, 3600);

    // A wrong password is rejected.
    let (status, body) = harness
        .post_json("/auth/login", json!({ "email": "a@x.com", "password": "nope" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).starts_with("Invalid credentials"));

    // The token buys food at a discount.
    let (status, body) = harness
        .post_json(
            "/food/buy",
            json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 3,
                    "price": 4.0, "discount": 50 }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["totalPrice"], json!(6.0));

    // An hour later the token no longer works.
    harness.clock.advance_seconds(3600);
    let (status, _) = harness
        .post_json(
            "/food/buy",
            json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 1,
                    "price": 4.0, "discount": 0 }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(harness.records.purchases().len(), 1);
}

#[rstest]
#[actix_rt::test]
async fn admin_ids_are_unique(harness: TestHarness) {
    let admin = |email: &str| {
        json!({ "name": "Root", "email": email, "password": "p", "userType": "admin", "adminId": 42 })
    };
    let (status, _) = harness.post_json("/auth/signup", admin("r1@x.com"), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = harness.post_json("/auth/signup", admin("r2@x.com"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["details"]["field"], json!("adminId"));
}

#[rstest]
#[actix_rt::test]
async fn organizations_cannot_donate(harness: TestHarness) {
    let email = "pantry@x.com";
    for (uri, payload) in [
        (
            "/auth/signup",
            json!({ "name": "Pantry", "email": email, "password": "p", "userType": "organization",
                    "organizationType": "recipient", "registrationNumber": "REG-7" }),
        ),
        ("/auth/verify", json!({ "email": email, "pin": TEST_PIN.to_string() })),
    ] {
        let (status, body) = harness.post_json(uri, payload, None).await;
        assert!(status.is_success(), "{uri}: {body}");
    }
    let (_, body) = harness
        .post_json("/auth/login", json!({ "email": email, "password": "p" }), None)
        .await;
    let token = body["token"].as_str().expect("token").to_owned();

    let (status, body) = harness
        .post_json(
            "/food/donate",
            json!({ "foodType": "soup", "quantity": 1, "expirationDate": "2026-02-01T00:00:00Z",
                    "location": "Dock 4", "pickupTime": "noon", "contactInfo": "555-0101",
                    "recipientId": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Only individuals can donate food");
}

//! Handler tests for the food endpoints.

use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use mockable::Clock;

use crate::domain::ports::TokenIssuer;
use crate::domain::{DonationStatus, UserId, UserType};
use crate::test_support::{TEST_PIN, TestHarness};

async fn logged_in(harness: &TestHarness, mut signup: Value) -> (String, UserId) {
    let email = signup["email"].as_str().unwrap_or_default().to_owned();
    signup["password"] = json!("pw");
    let (status, body) = harness.post_json("/auth/signup", signup, None).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let (status, body) = harness
        .post_json(
            "/auth/verify",
            json!({ "email": email, "pin": TEST_PIN.to_string() }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "verify failed: {body}");
    let (status, body) = harness
        .post_json("/auth/login", json!({ "email": email, "password": "pw" }), None)
        .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    let token = body["token"].as_str().expect("token").to_owned();
    let id = harness.users.account_for(&email).expect("account").id;
    (token, id)
}

fn individual(email: &str) -> Value {
    json!({ "name": "Ada", "email": email, "userType": "individual" })
}

fn donor_organization(email: &str) -> Value {
    json!({ "name": "Bakery", "email": email, "userType": "organization",
            "organizationType": "donor", "registrationNumber": "REG-9" })
}

fn donation(recipient: &UserId) -> Value {
    json!({
        "foodType": "bread",
        "quantity": 4,
        "expirationDate": "2026-11-01T12:00:00Z",
        "location": "Main St",
        "pickupTime": "18:00",
        "contactInfo": "555-0100",
        "recipientId": recipient.to_string(),
        "images": ["https://img.example/bread.jpg"],
    })
}

fn purchase() -> Value {
    json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 2, "price": 10.0, "discount": 25 })
}

#[rstest]
#[actix_web::test]
async fn individual_donation_to_known_recipient_is_pending() {
    let harness = TestHarness::new();
    let (token, donor) = logged_in(&harness, individual("a@x.com")).await;
    let (_, recipient) = logged_in(&harness, donor_organization("shelter@x.com")).await;

    let (status, body) = harness
        .post_json("/food/donate", donation(&recipient), Some(&token))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Donation created successfully"));
    assert_eq!(body["status"], json!("pending"));

    let stored = harness.records.donations();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].donor, donor);
    assert_eq!(stored[0].recipient, Some(recipient));
    assert_eq!(stored[0].status, DonationStatus::Pending);
    assert_eq!(stored[0].images.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn unknown_recipient_is_stored_as_none() {
    let harness = TestHarness::new();
    let (token, _) = logged_in(&harness, individual("a@x.com")).await;

    let (status, _) = harness
        .post_json("/food/donate", donation(&UserId::random()), Some(&token))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(harness.records.donations()[0].recipient, None);
}

#[rstest]
#[actix_web::test]
async fn purchase_total_is_computed_server_side() {
    let harness = TestHarness::new();
    let (token, buyer) = logged_in(&harness, individual("a@x.com")).await;

    let mut body = purchase();
    body["totalPrice"] = json!(1.0);
    let (status, body) = harness.post_json("/food/buy", body, Some(&token)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Food purchased successfully"));
    assert_eq!(body["totalPrice"], json!(15.0));

    let stored = harness.records.purchases();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].buyer, buyer);
    assert_eq!(stored[0].purchase_date, harness.clock.utc());
}

#[rstest]
#[actix_web::test]
async fn misspelt_restaurant_field_is_accepted() {
    let harness = TestHarness::new();
    let (token, _) = logged_in(&harness, individual("a@x.com")).await;

    let body = json!({ "resturant": "Luigi's", "foodType": "pizza", "quantity": 1, "price": 8.0, "discount": 0 });
    let (status, _) = harness.post_json("/food/buy", body, Some(&token)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(harness.records.purchases()[0].restaurant, "Luigi's");
}

#[rstest]
#[case("/food/donate", "Only individuals can donate food")]
#[case("/food/buy", "Only individuals can buy food")]
#[actix_web::test]
async fn non_individuals_are_forbidden(#[case] uri: &str, #[case] expected: &str) {
    let harness = TestHarness::new();
    let (token, own_id) = logged_in(&harness, donor_organization("bakery@x.com")).await;
    let payload = if uri.ends_with("donate") {
        donation(&own_id)
    } else {
        purchase()
    };

    let (status, body) = harness.post_json(uri, payload, Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!(expected));
    assert!(harness.records.donations().is_empty());
    assert!(harness.records.purchases().is_empty());
}

#[rstest]
#[case("/food/donate")]
#[case("/food/buy")]
#[actix_web::test]
async fn missing_token_is_unauthorised(#[case] uri: &str) {
    let harness = TestHarness::new();
    let (status, body) = harness.post_json(uri, purchase(), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("unauthorized"));
}

#[rstest]
#[actix_web::test]
async fn token_for_deleted_account_is_unauthorised() {
    let harness = TestHarness::new();
    let ghost = harness
        .tokens
        .issue(&UserId::random(), UserType::Individual)
        .expect("token issued");

    let (status, body) = harness
        .post_json("/food/buy", purchase(), Some(&ghost.token))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("User does not exist"));
}

#[rstest]
#[case(json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 2, "price": 10.0 }), "Missing required fields")]
#[case(json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 0, "price": 10.0, "discount": 0 }), "quantity must be between 1 and 2147483647")]
#[case(json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 3_000_000_000_i64, "price": 10.0, "discount": 0 }), "quantity must be between 1 and 2147483647")]
#[case(json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 2, "price": 0.0, "discount": 0 }), "price must be a positive number with a finite total")]
#[case(json!({ "restaurant": "Luigi's", "foodType": "pizza", "quantity": 10, "price": 1e308, "discount": 0 }), "price must be a positive number with a finite total")]
#[actix_web::test]
async fn invalid_purchases_are_bad_requests(#[case] payload: Value, #[case] expected: &str) {
    let harness = TestHarness::new();
    let (token, _) = logged_in(&harness, individual("a@x.com")).await;

    let (status, body) = harness.post_json("/food/buy", payload, Some(&token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!(expected));
    assert!(harness.records.purchases().is_empty());
}

#[rstest]
#[actix_web::test]
async fn invalid_discount_names_the_field() {
    let harness = TestHarness::new();
    let (token, _) = logged_in(&harness, individual("a@x.com")).await;
    let mut payload = purchase();
    payload["discount"] = json!(120);

    let (status, body) = harness.post_json("/food/buy", payload, Some(&token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("discount"));
}

//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::password::PasswordHash;
use crate::domain::ports::MockUserRepository;
use crate::domain::user::{UserId, UserRecord};

const SECRET: &[u8] = b"test-signing-secret-0123456789abcdef";
const TEST_COST: u32 = 4;

fn service(users: MockUserRepository) -> AccountService {
    AccountService::new(
        Arc::new(users),
        PasswordHasher::new(TEST_COST),
        TokenService::new(SECRET, 3600),
    )
}

fn signup_details(password: &str, confirmation: &str) -> SignupDetails {
    SignupDetails {
        name: UserName::new("Ada Lovelace").expect("valid name"),
        email: Email::new("ada@example.com").expect("valid email"),
        password: Zeroizing::new(password.to_owned()),
        password_confirmation: Zeroizing::new(confirmation.to_owned()),
    }
}

fn record_with_password(email: &Email, plaintext: &str) -> UserRecord {
    let hash = PasswordHasher::new(TEST_COST)
        .hash(plaintext)
        .expect("hash");
    UserRecord {
        id: UserId::random(),
        name: UserName::new("Ada Lovelace").expect("valid name"),
        email: email.clone(),
        role: Role::Pro,
        password_hash: Some(hash),
    }
}

#[tokio::test]
async fn signup_rejects_mismatched_confirmation_before_any_gateway_call() {
    let mut users = MockUserRepository::new();
    users.expect_create().times(0);
    users.expect_find_by_email().times(0);

    let err = service(users)
        .signup(signup_details("hunter2!", "hunter3!"))
        .await
        .expect_err("mismatched confirmation");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("password_confirmation_invalid"))
    );
}

#[tokio::test]
async fn signup_persists_a_hash_never_the_plaintext() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new| {
            new.password_hash.as_str() != "hunter2!"
                && new.password_hash.as_str().starts_with("$2")
        })
        .times(1)
        .returning(|new| {
            Ok(UserRecord {
                id: UserId::random(),
                name: new.name.clone(),
                email: new.email.clone(),
                role: new.role,
                password_hash: None,
            }
            .identity())
        });

    let identity = service(users)
        .signup(signup_details("hunter2!", "hunter2!"))
        .await
        .expect("signup succeeds");
    assert_eq!(identity.email().as_str(), "ada@example.com");
}

#[tokio::test]
async fn signup_always_assigns_the_pro_role() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new| new.role == Role::Pro)
        .times(1)
        .returning(|new| {
            Ok(UserRecord {
                id: UserId::random(),
                name: new.name.clone(),
                email: new.email.clone(),
                role: new.role,
                password_hash: None,
            }
            .identity())
        });

    let identity = service(users)
        .signup(signup_details("hunter2!", "hunter2!"))
        .await
        .expect("signup succeeds");
    assert_eq!(identity.role(), Role::Pro);
}

#[tokio::test]
async fn signup_surfaces_the_gateway_duplicate_as_a_conflict() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::DuplicateEmail));

    let err = service(users)
        .signup(signup_details("hunter2!", "hunter2!"))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("user_already_exists"))
    );
}

#[tokio::test]
async fn login_requests_the_password_from_the_gateway() {
    let email = Email::new("ada@example.com").expect("valid email");
    let record = record_with_password(&email, "hunter2!");

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|_, include_password| *include_password)
        .times(1)
        .return_once(move |_, _| Ok(Some(record)));

    let token = service(users)
        .login(LoginCredentials {
            email,
            password: Zeroizing::new("hunter2!".to_owned()),
        })
        .await
        .expect("login succeeds");
    assert!(!token.as_str().is_empty());
}

#[tokio::test]
async fn login_token_asserts_the_account_id_as_subject() {
    let email = Email::new("ada@example.com").expect("valid email");
    let record = record_with_password(&email, "hunter2!");
    let expected_subject = record.id.to_string();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_, _| Ok(Some(record)));

    let token = service(users)
        .login(LoginCredentials {
            email,
            password: Zeroizing::new("hunter2!".to_owned()),
        })
        .await
        .expect("login succeeds");

    let claims = TokenService::new(SECRET, 3600)
        .decode(token.as_str())
        .expect("decode token");
    assert_eq!(claims.sub, expected_subject);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let email = Email::new("ada@example.com").expect("valid email");

    let mut absent = MockUserRepository::new();
    absent
        .expect_find_by_email()
        .times(1)
        .return_once(|_, _| Ok(None));
    let unknown_err = service(absent)
        .login(LoginCredentials {
            email: email.clone(),
            password: Zeroizing::new("hunter2!".to_owned()),
        })
        .await
        .expect_err("unknown email");

    let record = record_with_password(&email, "hunter2!");
    let mut present = MockUserRepository::new();
    present
        .expect_find_by_email()
        .times(1)
        .return_once(move |_, _| Ok(Some(record)));
    let wrong_err = service(present)
        .login(LoginCredentials {
            email,
            password: Zeroizing::new("wrong password".to_owned()),
        })
        .await
        .expect_err("wrong password");

    assert_eq!(unknown_err, wrong_err);
    assert_eq!(unknown_err.code(), ErrorCode::Unauthorized);
}

use eatreal::error::EatRealError;
use eatreal::usecase::auth::{
    AuthenticateUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use eatreal_domain::ValidationError;

use crate::helpers::{Store, TEST_PASSWORD, local_user, test_user};

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: Some("Alice".to_owned()),
        last_name: None,
    }
}

// ── RegisterUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_then_login_with_same_password() {
    let store = Store::default();

    let registered = RegisterUseCase {
        repo: store.users(),
    }
    .execute(register_input("alice@example.com", TEST_PASSWORD))
    .await
    .unwrap();
    assert!(!registered.admin);

    let logged_in = LoginUseCase {
        repo: store.users(),
    }
    .execute(LoginInput {
        email: "alice@example.com".to_owned(),
        password: TEST_PASSWORD.to_owned(),
    })
    .await
    .unwrap();
    assert_eq!(logged_in.id, registered.id);
}

#[tokio::test]
async fn should_reject_duplicate_registration() {
    let store = Store::with_users(vec![local_user(1, "alice@example.com")]);

    let result = RegisterUseCase {
        repo: store.users(),
    }
    .execute(register_input("alice@example.com", TEST_PASSWORD))
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, EatRealError::UserAlreadyExists));
    assert_eq!(err.to_string(), "User already exists");
    assert_eq!(store.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let result = RegisterUseCase {
        repo: Store::default().users(),
    }
    .execute(register_input("not-an-email", TEST_PASSWORD))
    .await;
    assert!(matches!(
        result,
        Err(EatRealError::Validation(ValidationError::InvalidEmail))
    ));
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_wrong_password_as_invalid_credentials() {
    let store = Store::with_users(vec![local_user(1, "alice@example.com")]);

    let err = LoginUseCase {
        repo: store.users(),
    }
    .execute(LoginInput {
        email: "alice@example.com".to_owned(),
        password: "not-the-password".to_owned(),
    })
    .await
    .unwrap_err();

    assert!(matches!(err, EatRealError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn should_send_oauth_accounts_to_oauth_login() {
    let store = Store::with_users(vec![test_user(1, "bob@example.com")]);

    let err = LoginUseCase {
        repo: store.users(),
    }
    .execute(LoginInput {
        email: "bob@example.com".to_owned(),
        password: TEST_PASSWORD.to_owned(),
    })
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Please use OAuth login");
}

// ── AuthenticateUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_header_email_to_stored_user() {
    let store = Store::with_users(vec![test_user(7, "carol@example.com")]);
    let usecase = AuthenticateUseCase {
        repo: store.users(),
    };

    let user = usecase.execute(Some("carol@example.com")).await.unwrap();
    assert_eq!(user.id, 7);

    let err = usecase.execute(Some("mallory@example.com")).await.unwrap_err();
    assert!(matches!(err, EatRealError::UnknownIdentity));
    assert_eq!(err.to_string(), "User not found");
}

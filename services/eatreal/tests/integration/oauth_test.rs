use eatreal::domain::types::IdentityClaims;
use eatreal::error::EatRealError;
use eatreal::usecase::oauth::{CallbackInput, OAuthCallbackUseCase};

use crate::helpers::{MockIdentityProvider, Store, test_user};

fn claims(email: &str) -> IdentityClaims {
    IdentityClaims {
        email: Some(email.to_owned()),
        given_name: Some("Ada".to_owned()),
        family_name: Some("Lovelace".to_owned()),
    }
}

fn callback(state: &str, stored_state: &str) -> CallbackInput {
    CallbackInput {
        code: Some("auth-code".to_owned()),
        state: Some(state.to_owned()),
        stored_state: Some(stored_state.to_owned()),
        code_verifier: Some("verifier".to_owned()),
    }
}

#[tokio::test]
async fn should_reject_mismatched_state_without_calling_provider() {
    let provider = MockIdentityProvider::returning(claims("ada@example.com"));
    let exchanges = provider.exchanges_handle();
    let store = Store::default();

    let result = OAuthCallbackUseCase {
        users: store.users(),
        provider,
    }
    .execute(callback("from-query", "from-session"))
    .await;

    assert!(matches!(result, Err(EatRealError::InvalidOAuthCallback)));
    assert!(exchanges.lock().unwrap().is_empty());
    assert!(store.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_callback_without_stored_verifier() {
    let result = OAuthCallbackUseCase {
        users: Store::default().users(),
        provider: MockIdentityProvider::returning(claims("ada@example.com")),
    }
    .execute(CallbackInput {
        code_verifier: None,
        ..callback("s", "s")
    })
    .await;

    assert!(matches!(result, Err(EatRealError::InvalidOAuthCallback)));
}

#[tokio::test]
async fn should_create_user_without_password_and_send_verifier() {
    let provider = MockIdentityProvider::returning(claims("ada@example.com"));
    let exchanges = provider.exchanges_handle();
    let store = Store::default();

    let user = OAuthCallbackUseCase {
        users: store.users(),
        provider,
    }
    .execute(callback("s", "s"))
    .await
    .unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.password_hash, None);
    assert!(user.admin, "three-character local part gets the admin flag");
    assert_eq!(
        exchanges.lock().unwrap().as_slice(),
        &[("auth-code".to_owned(), "verifier".to_owned())]
    );
}

#[tokio::test]
async fn should_not_flag_longer_local_parts_as_admin() {
    let user = OAuthCallbackUseCase {
        users: Store::default().users(),
        provider: MockIdentityProvider::returning(claims("adalovelace@example.com")),
    }
    .execute(callback("s", "s"))
    .await
    .unwrap();

    assert!(!user.admin);
}

#[tokio::test]
async fn should_leave_existing_user_unchanged() {
    let existing = test_user(4, "ada@example.com");
    let store = Store::with_users(vec![existing.clone()]);

    let user = OAuthCallbackUseCase {
        users: store.users(),
        provider: MockIdentityProvider::returning(claims("ada@example.com")),
    }
    .execute(callback("s", "s"))
    .await
    .unwrap();

    assert_eq!(user, existing);
    assert_eq!(store.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_email_claim() {
    let result = OAuthCallbackUseCase {
        users: Store::default().users(),
        provider: MockIdentityProvider::returning(IdentityClaims::default()),
    }
    .execute(callback("s", "s"))
    .await;

    assert!(matches!(result, Err(EatRealError::IdentityProvider)));
}

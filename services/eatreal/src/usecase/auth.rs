use eatreal_domain::account::{parse_email, validate_password};

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::EatRealError;
use crate::infra::password::{hash_password, verify_password};

/// Trim optional free text, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, EatRealError> {
        let email = parse_email(&input.email)?;
        validate_password(&input.password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(EatRealError::UserAlreadyExists);
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create(&NewUser {
                email,
                password_hash: Some(password_hash),
                first_name: non_blank(input.first_name),
                last_name: non_blank(input.last_name),
                admin: false,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<User, EatRealError> {
        let email = parse_email(&input.email)?;
        if input.password.is_empty() {
            return Err(EatRealError::InvalidInput);
        }
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(EatRealError::InvalidCredentials)?;
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(EatRealError::OAuthOnlyAccount);
        };
        if !verify_password(&input.password, hash) {
            return Err(EatRealError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

/// Resolve the email carried by a session or `X-User-Email` to a stored user.
pub struct AuthenticateUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    pub async fn execute(&self, email: Option<&str>) -> Result<User, EatRealError> {
        let email = email.ok_or(EatRealError::Unauthenticated)?;
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(EatRealError::UnknownIdentity)
    }
}

// ── CurrentUser ──────────────────────────────────────────────────────────────

/// First stored user among the candidate emails, tried in order.
pub struct CurrentUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CurrentUserUseCase<R> {
    pub async fn execute(&self, emails: &[Option<&str>]) -> Result<User, EatRealError> {
        for email in emails.iter().flatten() {
            if let Some(user) = self.repo.find_by_email(email).await? {
                return Ok(user);
            }
        }
        Err(EatRealError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, EatRealError> {
        self.repo.list_all().await
    }
}

// ── CompanionCandidates ──────────────────────────────────────────────────────

/// Users that may be tagged as companions: friends, or everyone else for admins.
pub struct CompanionCandidatesUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CompanionCandidatesUseCase<R> {
    pub async fn execute(&self, user: &User) -> Result<Vec<User>, EatRealError> {
        if user.admin {
            self.repo.list_except(user.id).await
        } else {
            self.repo.list_friends(user.id).await
        }
    }
}

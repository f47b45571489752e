//! Authentication and profile service.
//!
//! Orchestrates signup, login, bearer-token checks, and profile updates on
//! top of a `UserRepository`, a `PasswordHasher`, and a `TokenIssuer`.

use chrono::Utc;
use tracing::{debug, info};

use wayfarer_types::auth::{AccessToken, LoginForm, TokenValidation};
use wayfarer_types::error::{AuthError, RepositoryError};
use wayfarer_types::user::{
    SignupRequest, TravelPreferences, UpdateProfileRequest, User, UserId, UserProfile,
    is_valid_email,
};

use super::password::PasswordHasher;
use super::token::TokenIssuer;
use crate::repository::user::UserRepository;

/// Service owning the identity lifecycle.
///
/// Generic over repository and infrastructure traits to maintain clean
/// architecture -- wayfarer-core never depends on wayfarer-infra.
pub struct AuthService<R: UserRepository, H: PasswordHasher, T: TokenIssuer> {
    user_repo: R,
    hasher: H,
    tokens: T,
}

impl<R: UserRepository, H: PasswordHasher, T: TokenIssuer> AuthService<R, H, T> {
    pub fn new(user_repo: R, hasher: H, tokens: T) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    /// Register a new user with empty travel preferences.
    pub async fn signup(&self, request: SignupRequest) -> Result<UserProfile, AuthError> {
        if !is_valid_email(&request.email) {
            return Err(AuthError::InvalidEmail(request.email));
        }

        let existing = self
            .user_repo
            .get_by_email(&request.email)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let hashed_password = self.hasher.hash_password(&request.password)?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: request.email,
            hashed_password,
            full_name: request.full_name,
            travel_preferences: TravelPreferences::new(),
            created_at: now,
            updated_at: now,
        };

        // The pre-check races with concurrent signups; the UNIQUE
        // constraint is the real guard.
        let user = self.user_repo.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::StorageError(other.to_string()),
        })?;

        info!(user_id = %user.id, "user signed up");
        Ok(user.profile())
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, form: &LoginForm) -> Result<AccessToken, AuthError> {
        let user = self
            .user_repo
            .get_by_email(&form.username)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .hasher
            .verify_password(&form.password, &user.hashed_password)?
        {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.email)?;
        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    /// Resolve a presented bearer token to the user it names.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = match self.tokens.validate(token) {
            TokenValidation::Valid(claims) => claims,
            TokenValidation::Expired => return Err(AuthError::TokenExpired),
            TokenValidation::Invalid => return Err(AuthError::InvalidToken),
        };

        self.user_repo
            .get_by_email(&claims.sub)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidToken)
    }

    /// Replace the user's display name and preferences wholesale.
    ///
    /// Any email in the request is ignored; the email is the identity.
    pub async fn update_profile(
        &self,
        user: &User,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, AuthError> {
        let updated = User {
            full_name: request.full_name,
            travel_preferences: request.travel_preferences,
            updated_at: Utc::now(),
            ..user.clone()
        };

        let saved = self
            .user_repo
            .update(&updated)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;

        info!(user_id = %saved.id, "profile updated");
        Ok(saved.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use wayfarer_types::auth::Claims;

    // --- Mocks ---

    #[derive(Default)]
    struct MockUserRepo {
        users: Mutex<Vec<User>>,
        fail_writes: bool,
    }

    impl UserRepository for MockUserRepo {
        async fn create(&self, user: &User) -> Result<User, RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Query("disk full".to_string()));
            }
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(RepositoryError::Conflict(user.email.clone()));
            }
            users.push(user.clone());
            Ok(user.clone())
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn update(&self, user: &User) -> Result<User, RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Query("disk full".to_string()));
            }
            let mut users = self.users.lock().unwrap();
            let slot = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = user.clone();
            Ok(user.clone())
        }
    }

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash_password(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct FakeTokens;

    impl TokenIssuer for FakeTokens {
        fn issue(&self, subject: &str) -> Result<AccessToken, AuthError> {
            Ok(AccessToken::bearer(format!("token:{subject}")))
        }

        fn validate(&self, token: &str) -> TokenValidation {
            if token == "expired" {
                return TokenValidation::Expired;
            }
            match token.strip_prefix("token:") {
                Some(sub) => TokenValidation::Valid(Claims {
                    sub: sub.to_string(),
                    exp: 0,
                    iat: 0,
                }),
                None => TokenValidation::Invalid,
            }
        }
    }

    fn service() -> AuthService<MockUserRepo, PlainHasher, FakeTokens> {
        AuthService::new(MockUserRepo::default(), PlainHasher, FakeTokens)
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "pw".to_string(),
            full_name: Some("A".to_string()),
        }
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            username: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_returns_profile_with_empty_preferences() {
        let svc = service();
        let profile = svc.signup(signup_request("a@x.com")).await.unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.full_name.as_deref(), Some("A"));
        assert!(profile.travel_preferences.is_empty());

        let stored = svc.user_repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.hashed_password, "hashed:pw");
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let svc = service();
        svc.signup(signup_request("a@x.com")).await.unwrap();
        let err = svc.signup(signup_request("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_email() {
        let svc = service();
        let err = svc.signup(signup_request("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_signup_storage_failure() {
        let svc = AuthService::new(
            MockUserRepo {
                fail_writes: true,
                ..Default::default()
            },
            PlainHasher,
            FakeTokens,
        );
        let err = svc.signup(signup_request("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_email() {
        let svc = service();
        svc.signup(signup_request("a@x.com")).await.unwrap();
        let token = svc.login(&login_form("a@x.com", "pw")).await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = svc.tokens.validate(&token.access_token).claims().unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let svc = service();
        svc.signup(signup_request("a@x.com")).await.unwrap();

        let wrong_pw = svc.login(&login_form("a@x.com", "nope")).await.unwrap_err();
        let unknown = svc.login(&login_form("b@x.com", "pw")).await.unwrap_err();
        assert_eq!(wrong_pw.to_string(), unknown.to_string());
        assert!(matches!(wrong_pw, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_outcomes() {
        let svc = service();
        svc.signup(signup_request("a@x.com")).await.unwrap();

        let user = svc.authenticate("token:a@x.com").await.unwrap();
        assert_eq!(user.email, "a@x.com");

        assert!(matches!(
            svc.authenticate("expired").await,
            Err(AuthError::TokenExpired)
        ));
        assert!(matches!(
            svc.authenticate("garbage").await,
            Err(AuthError::InvalidToken)
        ));
        // Well-formed token for a user that does not exist.
        assert!(matches!(
            svc.authenticate("token:ghost@x.com").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_update_profile_is_wholesale_and_keeps_email() {
        let svc = service();
        svc.signup(signup_request("a@x.com")).await.unwrap();
        let user = svc.authenticate("token:a@x.com").await.unwrap();

        let mut prefs = TravelPreferences::new();
        prefs.insert("climate".to_string(), serde_json::json!("warm"));
        let profile = svc
            .update_profile(
                &user,
                UpdateProfileRequest {
                    email: Some("hijack@x.com".to_string()),
                    full_name: None,
                    travel_preferences: prefs.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.email, "a@x.com");
        assert!(profile.full_name.is_none());
        assert_eq!(profile.travel_preferences, prefs);
    }
}

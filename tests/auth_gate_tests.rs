use mockall::{mock, predicate::eq};
use uuid::Uuid;

use portfolio_admin::entities::profile::{AccessDecision, DenyReason};
use portfolio_admin::entities::session::{AuthUser, LoginRequest, Session};
use portfolio_admin::errors::{AppError, AuthError};
use portfolio_admin::use_cases::auth::AuthGate;

mock! {
    pub Sessions {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::sessions::SessionService for Sessions {
        async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
        async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
        async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;
    }
}

mock! {
    pub Profiles {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::profiles::ProfileRepository for Profiles {
        async fn fetch_role(&self, user_id: &Uuid) -> Result<Option<String>, AppError>;
    }
}

fn user(id: Uuid) -> AuthUser {
    AuthUser {
        id,
        email: Some("admin@example.com".to_string()),
    }
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "admin@example.com".to_string(),
        password: "secret".to_string(),
    }
}

#[actix_rt::test]
async fn admin_login_returns_a_bearer_session() {
    let user_id = Uuid::new_v4();
    let mut sessions = MockSessions::new();
    let mut profiles = MockProfiles::new();

    sessions.expect_sign_in().times(1).returning(move |_, _| {
        Ok(Session {
            access_token: "token-123".to_string(),
            user: user(user_id),
        })
    });
    profiles
        .expect_fetch_role()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(Some("admin".to_string())));

    let gate = AuthGate::new(sessions, profiles);
    let response = gate.login(login_request()).await.expect("admin may log in");

    assert_eq!(response.access_token, "token-123");
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.user.id, user_id);
}

#[actix_rt::test]
async fn non_admin_login_is_signed_out_and_rejected() {
    let user_id = Uuid::new_v4();
    let mut sessions = MockSessions::new();
    let mut profiles = MockProfiles::new();

    sessions.expect_sign_in().times(1).returning(move |_, _| {
        Ok(Session {
            access_token: "token-456".to_string(),
            user: user(user_id),
        })
    });
    profiles
        .expect_fetch_role()
        .times(1)
        .returning(|_| Ok(Some("user".to_string())));
    // The freshly created session must be discarded.
    sessions
        .expect_sign_out()
        .with(eq("token-456"))
        .times(1)
        .returning(|_| Ok(()));

    let gate = AuthGate::new(sessions, profiles);
    let result = gate.login(login_request()).await;

    assert!(matches!(result, Err(AuthError::Forbidden(_))));
}

#[actix_rt::test]
async fn wrong_credentials_pass_through() {
    let mut sessions = MockSessions::new();
    let profiles = MockProfiles::new();

    sessions
        .expect_sign_in()
        .times(1)
        .returning(|_, _| Err(AuthError::WrongCredentials));

    let gate = AuthGate::new(sessions, profiles);
    let result = gate.login(login_request()).await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[actix_rt::test]
async fn malformed_email_never_reaches_the_backend() {
    // No expectations: sign-in must not be attempted.
    let sessions = MockSessions::new();
    let profiles = MockProfiles::new();

    let gate = AuthGate::new(sessions, profiles);
    let result = gate
        .login(LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::MissingCredentials)));
}

#[actix_rt::test]
async fn role_lookup_failure_denies() {
    let user_id = Uuid::new_v4();
    let sessions = MockSessions::new();
    let mut profiles = MockProfiles::new();

    profiles
        .expect_fetch_role()
        .times(1)
        .returning(|_| Err(AppError::RemoteApi("profiles unreachable".to_string())));

    let gate = AuthGate::new(sessions, profiles);
    let decision = gate.resolve(&user(user_id)).await;

    assert_eq!(decision, AccessDecision::Denied(DenyReason::NotAdmin));
}

#[actix_rt::test]
async fn missing_profile_row_denies() {
    let user_id = Uuid::new_v4();
    let sessions = MockSessions::new();
    let mut profiles = MockProfiles::new();

    profiles.expect_fetch_role().times(1).returning(|_| Ok(None));

    let gate = AuthGate::new(sessions, profiles);
    let decision = gate.resolve(&user(user_id)).await;

    assert_eq!(decision, AccessDecision::Denied(DenyReason::NotAdmin));
}

#[actix_rt::test]
async fn admin_role_allows() {
    let user_id = Uuid::new_v4();
    let sessions = MockSessions::new();
    let mut profiles = MockProfiles::new();

    profiles
        .expect_fetch_role()
        .times(1)
        .returning(|_| Ok(Some("admin".to_string())));

    let gate = AuthGate::new(sessions, profiles);
    let decision = gate.resolve(&user(user_id)).await;

    assert_eq!(decision, AccessDecision::Allowed(user(user_id)));
}

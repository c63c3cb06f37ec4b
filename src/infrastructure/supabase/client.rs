use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::entities::session::{AuthUser, Session};
use crate::errors::{AppError, AuthError};
use crate::infrastructure::supabase::rest::SelectQuery;
use crate::settings::{AppConfig, ServiceKey};

/// The managed-backend client: session auth, row-level table access, and
/// object storage, all over Supabase's HTTP surface. Requests carry the
/// service-role key; operator tokens are only ever forwarded to the auth
/// endpoints that resolve them.
///
/// No request timeout is configured: a stalled backend call stalls the
/// operation, matching the dashboard's (documented) lack of timeout
/// handling.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    service_key: ServiceKey,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.supabase_url)?;

        Ok(SupabaseClient {
            http: Client::new(),
            base_url,
            service_key: config.service_key(),
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) fn service_key(&self) -> &str {
        self.service_key.expose()
    }

    /// Attaches the service-role key the way PostgREST and storage expect it.
    pub(crate) fn keyed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.service_key())
            .bearer_auth(self.service_key())
    }

    // ───── Table Access ─────────────────────────────────────────────

    pub fn select<'a>(&'a self, table: &'a str) -> SelectQuery<'a> {
        SelectQuery::new(self, table)
    }

    // ───── Auth ─────────────────────────────────────────────────────

    /// Password-grant sign-in; wrong credentials surface as such, every
    /// other failure as a remote auth error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self
            .endpoint("auth/v1/token?grant_type=password")
            .map_err(|e| AuthError::RemoteAuth(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .header("apikey", self.service_key())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::WrongCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::RemoteAuth(format!("sign-in failed with {status}")));
        }

        let grant: PasswordGrant = response.json().await?;
        Ok(Session {
            access_token: grant.access_token,
            user: grant.user,
        })
    }

    /// Resolves a bearer token to its user. An unknown or expired token is
    /// `None`, not an error.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let url = self
            .endpoint("auth/v1/user")
            .map_err(|e| AuthError::RemoteAuth(e.to_string()))?;

        let response = self
            .http
            .get(url)
            .header("apikey", self.service_key())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthError::RemoteAuth(format!("get-user failed with {status}")));
        }

        let user: AuthUser = response.json().await?;
        Ok(Some(user))
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self
            .endpoint("auth/v1/logout")
            .map_err(|e| AuthError::RemoteAuth(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .header("apikey", self.service_key())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        // Signing out an already-dead session is fine.
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(AuthError::RemoteAuth(format!("sign-out failed with {status}")))
        }
    }

    /// Reachability probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        let url = self.endpoint("auth/v1/health")?;
        let response = self
            .http
            .get(url)
            .header("apikey", self.service_key())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::RemoteApi(format!(
                "health probe failed with {}",
                response.status()
            )))
        }
    }

    // ───── Object Storage ───────────────────────────────────────────

    pub async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let url = self.endpoint(&format!(
            "storage/v1/object/{}/{}",
            bucket,
            urlencoding::encode(object)
        ))?;

        let response = self
            .keyed(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        error_for_status(response, "storage upload").await?;
        Ok(())
    }

    pub fn object_public_url(&self, bucket: &str, object: &str) -> String {
        format!(
            "{}storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            urlencoding::encode(object)
        )
    }
}

#[derive(Debug, Deserialize)]
struct PasswordGrant {
    access_token: String,
    user: AuthUser,
}

/// Turns a non-2xx response into a `RemoteApi` error carrying a truncated
/// body snippet.
pub(crate) async fn error_for_status(
    response: reqwest::Response,
    operation: &str,
) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::RemoteApi(format!(
        "{operation} failed with {status}: {}",
        body.chars().take(200).collect::<String>()
    )))
}

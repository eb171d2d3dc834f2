//! Firebase Auth Client
//!
//! Anonymous and Google sign-in against the Identity Toolkit REST API,
//! token refresh, session persistence and auth-state notifications.

use std::cell::RefCell;

use log::{debug, info, warn};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use two_tier_cache::KeyValueStore;

use super::{now_ms, read_json, CloudError, CloudResult};
use crate::models::UserProfile;
use crate::storage::{BrowserStorage, SESSION_KEY};

const IDENTITY_BASE: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

/// Refresh the id token when it expires within this window
const REFRESH_MARGIN_MS: f64 = 60_000.0;

/// Signed-in session, persisted so a reload can restore it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at_ms: f64,
    pub is_anonymous: bool,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn needs_refresh(&self, now_ms: f64) -> bool {
        self.expires_at_ms - now_ms < REFRESH_MARGIN_MS
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            uid: self.uid.clone(),
            is_anonymous: self.is_anonymous,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// `expiresIn` is a string of seconds
fn expires_at(now_ms: f64, expires_in: &str) -> f64 {
    now_ms + expires_in.parse::<f64>().unwrap_or(3600.0) * 1000.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    local_id: String,
}

/// The secure token endpoint answers in snake_case
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdpResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

type AuthListener = Box<dyn Fn(Option<&UserProfile>)>;

/// Identity client handle. One per app, shared through `Rc`.
pub struct FirebaseAuth<S = BrowserStorage> {
    http: reqwest::Client,
    api_key: String,
    store: S,
    session: RefCell<Option<Session>>,
    listeners: RefCell<Vec<AuthListener>>,
}

impl<S: KeyValueStore> FirebaseAuth<S> {
    pub fn new(api_key: impl Into<String>, store: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            store,
            session: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.borrow().as_ref().map(Session::profile)
    }

    pub fn uid(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.uid.clone())
    }

    /// Called with the new user (or `None`) on every sign-in, restore and sign-out
    pub fn on_auth_state_changed(&self, listener: impl Fn(Option<&UserProfile>) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub async fn sign_in_anonymously(&self) -> CloudResult<UserProfile> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            return_secure_token: bool,
        }

        let response = self
            .http
            .post(format!("{}/accounts:signUp", IDENTITY_BASE))
            .query(&[("key", self.api_key.as_str())])
            .json(&Body { return_secure_token: true })
            .send()
            .await?;
        let body: SignUpResponse = read_json(response).await?;

        let session = Session {
            uid: body.local_id,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at_ms: expires_at(now_ms(), &body.expires_in),
            is_anonymous: true,
            email: None,
            display_name: None,
        };
        info!("[AUTH] Signed in anonymously as {}", session.uid);
        let profile = session.profile();
        self.install(session, true);
        Ok(profile)
    }

    /// Exchange a Google id token (from the OAuth popup or redirect) for a
    /// Firebase session
    pub async fn sign_in_with_google(
        &self,
        google_id_token: &str,
        request_uri: &str,
    ) -> CloudResult<UserProfile> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            post_body: String,
            request_uri: &'a str,
            return_secure_token: bool,
            return_idp_credential: bool,
        }

        let post_body = format!(
            "id_token={}&providerId=google.com",
            utf8_percent_encode(google_id_token, NON_ALPHANUMERIC)
        );
        let response = self
            .http
            .post(format!("{}/accounts:signInWithIdp", IDENTITY_BASE))
            .query(&[("key", self.api_key.as_str())])
            .json(&Body {
                post_body,
                request_uri,
                return_secure_token: true,
                return_idp_credential: true,
            })
            .send()
            .await?;
        let body: IdpResponse = read_json(response).await?;

        let session = Session {
            uid: body.local_id,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at_ms: expires_at(now_ms(), &body.expires_in),
            is_anonymous: false,
            email: body.email,
            display_name: body.display_name,
        };
        info!("[AUTH] Signed in with Google as {}", session.uid);
        let profile = session.profile();
        self.install(session, true);
        Ok(profile)
    }

    /// Resume the persisted session, if any. A rejected refresh token
    /// drops the saved session instead of failing.
    pub async fn restore(&self) -> CloudResult<Option<UserProfile>> {
        let Some(saved) = self.persisted_session() else {
            return Ok(None);
        };

        match self.refresh(&saved).await {
            Ok(session) => {
                debug!("[AUTH] Restored session for {}", session.uid);
                let profile = session.profile();
                self.install(session, true);
                Ok(Some(profile))
            }
            Err(CloudError::Api { status, message }) => {
                warn!("[AUTH] Saved session rejected ({}): {}", status, message);
                self.store.remove(SESSION_KEY);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn restore_or_sign_in_anonymously(&self) -> CloudResult<UserProfile> {
        if let Some(profile) = self.restore().await? {
            return Ok(profile);
        }
        self.sign_in_anonymously().await
    }

    /// Current id token, refreshed first when close to expiry
    pub async fn id_token(&self) -> CloudResult<String> {
        let session = self.session.borrow().clone().ok_or(CloudError::NoSession)?;
        if !session.needs_refresh(now_ms()) {
            return Ok(session.id_token);
        }

        let refreshed = self.refresh(&session).await?;
        let token = refreshed.id_token.clone();
        self.install(refreshed, false);
        Ok(token)
    }

    pub fn sign_out(&self) {
        if let Some(uid) = self.uid() {
            info!("[AUTH] Signing out {}", uid);
        }
        *self.session.borrow_mut() = None;
        self.store.remove(SESSION_KEY);
        self.notify();
    }

    async fn refresh(&self, session: &Session) -> CloudResult<Session> {
        let response = self
            .http
            .post(SECURE_TOKEN_URL)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ])
            .send()
            .await?;
        let body: RefreshResponse = read_json(response).await?;

        Ok(Session {
            uid: body.user_id,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at_ms: expires_at(now_ms(), &body.expires_in),
            ..session.clone()
        })
    }

    fn persisted_session(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("[AUTH] Ignoring malformed saved session: {}", e);
                None
            }
        }
    }

    fn install(&self, session: Session, notify: bool) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = self.store.set(SESSION_KEY, &raw) {
                    warn!("[AUTH] Could not persist session: {}", e);
                }
            }
            Err(e) => warn!("[AUTH] Could not encode session: {}", e),
        }
        *self.session.borrow_mut() = Some(session);
        if notify {
            self.notify();
        }
    }

    fn notify(&self) {
        let profile = self.current_user();
        for listener in self.listeners.borrow().iter() {
            listener(profile.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use two_tier_cache::MemoryStore;

    fn session(uid: &str) -> Session {
        Session {
            uid: uid.to_string(),
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at_ms: 1_000_000.0,
            is_anonymous: false,
            email: Some("wukong@example.com".to_string()),
            display_name: None,
        }
    }

    #[test]
    fn test_needs_refresh_inside_margin() {
        let s = session("u1");
        assert!(!s.needs_refresh(900_000.0));
        assert!(s.needs_refresh(950_000.0));
        assert!(s.needs_refresh(2_000_000.0));
    }

    #[test]
    fn test_expires_in_is_seconds() {
        assert_eq!(expires_at(1000.0, "3600"), 3_601_000.0);
        assert_eq!(expires_at(0.0, "garbage"), 3_600_000.0);
    }

    #[test]
    fn test_install_persists_and_notifies() {
        let store = MemoryStore::new();
        let auth = FirebaseAuth::new("key", store.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        auth.on_auth_state_changed(move |user| {
            sink.borrow_mut().push(user.map(|u| u.uid.clone()));
        });

        auth.install(session("u1"), true);

        assert_eq!(auth.uid().as_deref(), Some("u1"));
        assert_eq!(auth.persisted_session(), Some(session("u1")));
        assert_eq!(*seen.borrow(), vec![Some("u1".to_string())]);
    }

    #[test]
    fn test_sign_out_clears_session_and_notifies() {
        let store = MemoryStore::new();
        let auth = FirebaseAuth::new("key", store.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        auth.on_auth_state_changed(move |user| sink.borrow_mut().push(user.cloned()));

        auth.install(session("u1"), false);
        auth.sign_out();

        assert_eq!(auth.current_user(), None);
        assert!(store.get(SESSION_KEY).is_none());
        assert_eq!(*seen.borrow(), vec![None]);
    }

    #[test]
    fn test_malformed_saved_session_is_ignored() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "{\"uid\":").unwrap();
        let auth = FirebaseAuth::new("key", store);
        assert_eq!(auth.persisted_session(), None);
    }
}

//! Interactive Google Sign-In
//!
//! OAuth implicit flow returning an `id_token` in the URL fragment, which is
//! then exchanged for a Firebase session. Mobile browsers use a full-page
//! redirect; desktop browsers use a popup polled until it lands back on
//! this origin.

use log::info;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use two_tier_cache::KeyValueStore;
use wasm_bindgen::JsValue;

use super::{CloudError, CloudResult, FirebaseAuth};
use crate::models::UserProfile;
use crate::storage::{BrowserStorage, PENDING_OAUTH_KEY};
use crate::timers;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const POPUP_NAME: &str = "wukong-sign-in";
const POPUP_FEATURES: &str = "width=480,height=640";
const POPUP_POLL_MS: u32 = 300;
/// Two minutes of polling
const POPUP_MAX_POLLS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMode {
    Popup,
    Redirect,
}

impl SignInMode {
    pub fn for_user_agent(user_agent: &str) -> Self {
        if is_mobile_user_agent(user_agent) {
            SignInMode::Redirect
        } else {
            SignInMode::Popup
        }
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    const MARKERS: [&str; 6] = ["android", "iphone", "ipad", "ipod", "mobile", "windows phone"];
    let ua = user_agent.to_ascii_lowercase();
    MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Result of starting an interactive sign-in
#[derive(Debug, Clone, PartialEq)]
pub enum InteractiveOutcome {
    SignedIn(UserProfile),
    /// The page is navigating to the provider; the result is picked up by
    /// [`take_redirect_result`] on the next load
    Redirecting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OAuthResponse {
    id_token: String,
    state: Option<String>,
}

fn authorize_url(client_id: &str, redirect_uri: &str, state: &str) -> String {
    let enc = |v: &str| utf8_percent_encode(v, NON_ALPHANUMERIC).to_string();
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=id_token&scope={}&nonce={}&state={}&prompt=select_account",
        AUTHORIZE_URL,
        enc(client_id),
        enc(redirect_uri),
        enc("openid email profile"),
        enc(state),
        enc(state),
    )
}

/// Parse `#id_token=...&state=...` or `#error=...`. `Ok(None)` when the
/// fragment carries no OAuth response.
fn parse_fragment(fragment: &str) -> CloudResult<Option<OAuthResponse>> {
    let fragment = fragment.trim_start_matches('#');
    let mut id_token = None;
    let mut state = None;
    let mut error = None;

    for pair in fragment.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
        match key {
            "id_token" => id_token = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(CloudError::OAuth(error));
    }
    Ok(id_token.map(|id_token| OAuthResponse { id_token, state }))
}

fn new_state() -> String {
    let part = || (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    format!("{:08x}{:08x}", part(), part())
}

fn js_error(value: JsValue) -> CloudError {
    CloudError::OAuth(format!("{:?}", value))
}

/// This page without query or fragment, used as the OAuth redirect target
fn page_uri(window: &web_sys::Window) -> CloudResult<String> {
    let location = window.location();
    let origin = location.origin().map_err(js_error)?;
    let path = location.pathname().map_err(js_error)?;
    Ok(format!("{}{}", origin, path))
}

/// True inside the sign-in popup once it has landed back here. The app is
/// not mounted there; the opener reads the fragment and closes it.
pub fn is_auth_popup() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let has_opener = window
        .opener()
        .map(|o| !o.is_null() && !o.is_undefined())
        .unwrap_or(false);
    let hash = window.location().hash().unwrap_or_default();
    has_opener && (hash.contains("id_token=") || hash.contains("error="))
}

pub async fn run_interactive_sign_in(
    auth: &FirebaseAuth,
    client_id: &str,
) -> CloudResult<InteractiveOutcome> {
    let window = web_sys::window().ok_or_else(|| CloudError::OAuth("no window".to_string()))?;
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let redirect_uri = page_uri(&window)?;
    let state = new_state();
    let url = authorize_url(client_id, &redirect_uri, &state);

    match SignInMode::for_user_agent(&user_agent) {
        SignInMode::Redirect => {
            info!("[OAUTH] Redirecting to Google sign-in");
            BrowserStorage
                .set(PENDING_OAUTH_KEY, &state)
                .map_err(|e| CloudError::OAuth(e.to_string()))?;
            window.location().assign(&url).map_err(js_error)?;
            Ok(InteractiveOutcome::Redirecting)
        }
        SignInMode::Popup => {
            info!("[OAUTH] Opening Google sign-in popup");
            let response = run_popup(&window, &url).await?;
            if response.state.as_deref() != Some(state.as_str()) {
                return Err(CloudError::OAuth("state mismatch".to_string()));
            }
            let profile = auth
                .sign_in_with_google(&response.id_token, &redirect_uri)
                .await?;
            Ok(InteractiveOutcome::SignedIn(profile))
        }
    }
}

async fn run_popup(window: &web_sys::Window, url: &str) -> CloudResult<OAuthResponse> {
    let popup = window
        .open_with_url_and_target_and_features(url, POPUP_NAME, POPUP_FEATURES)
        .ok()
        .flatten()
        .ok_or(CloudError::PopupBlocked)?;

    for _ in 0..POPUP_MAX_POLLS {
        timers::sleep_ms(POPUP_POLL_MS).await;
        if popup.closed().unwrap_or(true) {
            return Err(CloudError::PopupClosed);
        }
        // Reading the location throws while the popup is on Google's origin
        let Ok(hash) = popup.location().hash() else {
            continue;
        };
        match parse_fragment(&hash) {
            Ok(None) => continue,
            result => {
                let _ = popup.close();
                return result.and_then(|r| r.ok_or(CloudError::PopupClosed));
            }
        }
    }

    let _ = popup.close();
    Err(CloudError::OAuth("sign-in popup timed out".to_string()))
}

/// Finish a redirect sign-in started on a previous load, if one is pending
pub async fn take_redirect_result(auth: &FirebaseAuth) -> CloudResult<Option<UserProfile>> {
    let Some(expected) = BrowserStorage.get(PENDING_OAUTH_KEY) else {
        return Ok(None);
    };
    BrowserStorage.remove(PENDING_OAUTH_KEY);

    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let hash = window.location().hash().unwrap_or_default();
    let response = parse_fragment(&hash);
    clear_fragment(&window);

    let Some(response) = response? else {
        return Ok(None);
    };
    if response.state.as_deref() != Some(expected.as_str()) {
        return Err(CloudError::OAuth("state mismatch".to_string()));
    }

    let redirect_uri = page_uri(&window)?;
    auth.sign_in_with_google(&response.id_token, &redirect_uri)
        .await
        .map(Some)
}

/// Drop the token from the address bar, back to the Time Fragments view
fn clear_fragment(window: &web_sys::Window) {
    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    if let Ok(history) = window.history() {
        let url = format!("{}{}#fragments", path, search);
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

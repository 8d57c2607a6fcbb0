use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config,
    error::{Error, Result},
    info,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

use super::client::check_response;

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Obtains an app token with the client credentials flow.
///
/// Enough for reading public playlists and artists. Credentials are checked
/// before any request is made.
///
/// # Errors
///
/// - [`Error::Config`] when client id or secret are missing
/// - [`Error::Auth`] when Spotify rejects the credentials
pub async fn client_credentials() -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let client_secret = config::spotify_client_secret()?;

    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let response = check_response(response).await.map_err(auth_error)?;
    Ok(response.json::<Token>().await?)
}

/// Runs the OAuth 2.0 PKCE flow and returns a user token.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Binds the local callback server to the host and port of the redirect URI
/// 3. Opens the authorization URL in the default browser
/// 4. Waits up to 60 seconds for the callback to exchange the code
///
/// # Errors
///
/// - [`Error::Config`] when client id or redirect URI are missing
/// - [`Error::Auth`] for an unusable redirect URI, a denied authorization
///   or a timeout
pub async fn authorize_user() -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let (bind_addr, callback_path) = callback_target(&redirect_uri)?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
        error: None,
    })));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| Error::Auth(format!("cannot listen on {bind_addr}: {e}")))?;

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_state, callback_path).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid SPOTIFY_API_AUTH_URL: {e}")))?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let outcome = wait_for_token(shared_state).await;
    server.abort();
    outcome
}

/// Splits the redirect URI into the address to bind and the callback route.
pub fn callback_target(redirect_uri: &str) -> Result<(String, String)> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| Error::Auth(format!("invalid redirect URI {redirect_uri}: {e}")))?;

    let host = url
        .host_str()
        .ok_or_else(|| Error::Auth(format!("redirect URI {redirect_uri} has no host")))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| Error::Auth(format!("redirect URI {redirect_uri} has no port")))?;

    let path = match url.path() {
        "" => "/".to_string(),
        path => path.to_string(),
    };

    Ok((format!("{host}:{port}"), path))
}

/// Polls the shared state until the callback stored a token or an error.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Ok(token.clone());
            }
            if let Some(error) = &pkce_token.error {
                return Err(Error::Auth(error.clone()));
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(Error::Auth("authorization timed out".to_string()))
}

/// Exchanges an authorization code for a user token using the PKCE verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let response = check_response(response).await.map_err(auth_error)?;
    Ok(response.json::<Token>().await?)
}

fn auth_error(err: Error) -> Error {
    match err {
        Error::Upstream { status, message } => {
            Error::Auth(format!("token request rejected ({status}): {message}"))
        }
        Error::RateLimited { .. } => Error::Auth("token request rate limited".to_string()),
        other => other,
    }
}

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config,
    error::{Error, Result},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, Artist, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, ErrorBody, ErrorResponse, PlaylistTracksPage,
        SeveralArtistsResponse, Token,
    },
};

use super::SpotifyApi;

const PLAYLIST_PAGE_LIMIT: &str = "100";
const PLAYLIST_FIELDS: &str = "items(track(id,name,is_local,artists(id,name))),next,total";

/// reqwest based [`SpotifyApi`] implementation holding a bearer token.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: Token,
}

impl SpotifyClient {
    /// Creates a client against the configured API URL.
    pub fn new(token: Token) -> Self {
        Self::with_api_url(token, config::spotify_apiurl())
    }

    pub fn with_api_url(token: Token, api_url: String) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url,
            token,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;

        let response = check_response(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token.access_token)
            .json(body)
            .send()
            .await?;

        let response = check_response(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistTracksPage> {
        match cursor {
            // `next` already carries limit, offset and fields
            Some(next) => self.get(next, &[]).await,
            None => {
                let api_url = format!(
                    "{uri}/playlists/{id}/tracks",
                    uri = self.api_url,
                    id = playlist_id
                );
                self.get(
                    &api_url,
                    &[("limit", PLAYLIST_PAGE_LIMIT), ("fields", PLAYLIST_FIELDS)],
                )
                .await
            }
        }
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>> {
        let api_url = format!("{uri}/artists", uri = self.api_url);
        let ids = ids.join(",");

        let res: SeveralArtistsResponse = self.get(&api_url, &[("ids", ids.as_str())]).await?;
        Ok(res.artists)
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        let api_url = format!("{uri}/me", uri = self.api_url);
        self.get(&api_url, &[]).await
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.api_url,
            user_id = owner_id
        );
        self.post(&api_url, request).await
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks",
            uri = self.api_url,
            playlist_id = playlist_id
        );
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        self.post(&api_url, &body).await
    }
}

/// Passes successful responses through and turns the rest into errors.
///
/// 429 becomes [`Error::RateLimited`] with the `Retry-After` value, any other
/// status becomes [`Error::Upstream`] with the message from the error payload
/// (or the raw body when it is not JSON).
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited {
            retry_after: retry_after(response.headers()),
        });
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Reads the `Retry-After` header as whole seconds.
pub fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorBody::Api { message, .. },
        }) => message,
        Ok(ErrorResponse {
            error: ErrorBody::OAuth(code),
        }) => code,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

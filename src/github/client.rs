// src/github/client.rs
// =============================================================================
// Thin wrapper around reqwest::Client that every GitHub call goes through.
//
// Responsibilities:
// - Attach the User-Agent (GitHub rejects requests without one)
// - Attach "Authorization: token <TOKEN>" when a token was supplied
// - After every response, check the rate-limit headers and back off
// - Map non-2xx statuses to the right FetchError variant
//
// One request is in flight at a time: callers await each call before
// issuing the next one.
// =============================================================================

use crate::error::{FetchError, Result};
use crate::github::rate_limit::{Clock, RateLimit};
use crate::logger::Logger;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

pub struct ApiClient {
    http: Client,
    api_base: Url,
    token: Option<String>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Logger>,
}

impl ApiClient {
    pub fn new(
        api_base: Url,
        token: Option<String>,
        clock: Arc<dyn Clock>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(ApiClient {
            http,
            api_base,
            token: token.filter(|t| !t.trim().is_empty()),
            clock,
            logger,
        })
    }

    /// Builds `{api_base}/{segments...}?{query}`, keeping any path prefix of
    /// the base (GitHub Enterprise serves the API under /api/v3).
    ///
    /// Each segment is percent-encoded, so names like "c#" or "a?b" stay
    /// part of the path.
    pub fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
        query: &[(&str, &str)],
    ) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::MalformedUrl {
                url: self.api_base.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// GETs an API endpoint and decodes the JSON body.
    ///
    /// Non-2xx responses become `FetchError::Api`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url, true).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::UnexpectedResponse {
            url: url.to_string(),
            source,
        })
    }

    /// GETs raw file content.
    ///
    /// Non-2xx responses become `FetchError::Download`.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url, false).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: &str, api: bool) -> Result<Response> {
        let mut request = self.http.get(url);
        if api {
            request = request.header(ACCEPT, GITHUB_JSON);
        }
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        self.handle_rate_limit(&response).await;
        Ok(response)
    }

    /// Sleeps when the response says the quota is used up.
    ///
    /// Runs before the status check so a 403 "rate limited" reply still waits.
    async fn handle_rate_limit(&self, response: &Response) {
        let now = self.clock.now();
        let limit = RateLimit::from_headers(response.headers(), now);
        self.logger
            .debug(&format!("Rate limit remaining: {}", limit.remaining));

        if let Some(wait) = limit.backoff(now) {
            self.logger.warning(&format!(
                "Rate limit exceeded. Sleeping for {} seconds.",
                wait.as_secs()
            ));
            if self.token.is_none() {
                self.logger.info(
                    "To avoid this in the future, authenticate using a GitHub personal access token (PAT).",
                );
                self.logger
                    .info("Generate a token here: https://github.com/settings/tokens");
                self.logger.info(
                    "Use the --token argument (or GITHUB_TOKEN) to provide your token when running gh-folder.",
                );
            }
            self.clock.sleep(wait).await;
        }
    }
}

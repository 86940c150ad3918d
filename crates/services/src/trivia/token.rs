use std::sync::Arc;

use quiz_core::model::SessionToken;

use crate::error::TriviaApiError;
use crate::trivia::client::TriviaApi;

/// Obtains the session token once and hands out the cached copy afterwards.
///
/// Only one request is ever made. If it fails, later calls fail with
/// `TriviaApiError::TokenUnavailable` without touching the network.
#[derive(Clone)]
pub struct SessionTokenProvider {
    api: Arc<dyn TriviaApi>,
    cached: Option<SessionToken>,
    attempted: bool,
}

impl SessionTokenProvider {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self {
            api,
            cached: None,
            attempted: false,
        }
    }

    #[must_use]
    pub fn cached(&self) -> Option<&SessionToken> {
        self.cached.as_ref()
    }

    /// Return the cached token, requesting one on first use.
    ///
    /// # Errors
    ///
    /// Returns the transport error of the first attempt, or
    /// `TriviaApiError::TokenUnavailable` once that attempt has failed.
    pub async fn ensure_token(&mut self) -> Result<SessionToken, TriviaApiError> {
        if let Some(token) = &self.cached {
            return Ok(token.clone());
        }
        if self.attempted {
            return Err(TriviaApiError::TokenUnavailable);
        }

        self.attempted = true;
        match self.api.request_token().await {
            Ok(token) => {
                tracing::debug!("session token obtained");
                self.cached = Some(token.clone());
                Ok(token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "session token request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::InMemoryTriviaApi;

    #[tokio::test]
    async fn second_call_is_a_cache_hit() {
        let api = InMemoryTriviaApi::new().with_token("tok");
        let mut provider = SessionTokenProvider::new(Arc::new(api.clone()));

        let first = provider.ensure_token().await.unwrap();
        let second = provider.ensure_token().await.unwrap();

        assert_eq!(first, SessionToken::new("tok"));
        assert_eq!(first, second);
        assert_eq!(api.token_requests(), 1);
        assert_eq!(provider.cached(), Some(&first));
    }

    #[tokio::test]
    async fn failed_request_is_not_retried() {
        let api = InMemoryTriviaApi::new();
        let mut provider = SessionTokenProvider::new(Arc::new(api.clone()));

        assert!(provider.ensure_token().await.is_err());
        let err = provider.ensure_token().await.unwrap_err();

        assert!(matches!(err, TriviaApiError::TokenUnavailable));
        assert_eq!(api.token_requests(), 1);
        assert!(provider.cached().is_none());
    }
}

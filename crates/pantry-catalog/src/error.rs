use thiserror::Error;

/// Failures of a catalog search, folded into a closed set.
///
/// Display strings are the fixed user-facing messages. Provider payloads
/// never leak through them; raw detail stays on the error source chain.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Query was empty after trimming. Rejected before any network call.
    #[error("Search query must contain at least one character")]
    EmptyQuery,

    /// Provider rejected the request as malformed.
    #[error("Invalid request. Please try again.")]
    BadQuery,

    /// Provider answered 401. The provider uses it as a throttle signal,
    /// so it reads as "slow down" rather than "bad credentials".
    #[error("Please wait a few seconds and then try again!")]
    RateLimited,

    /// No products matched the query.
    #[error("Sorry! No food items were found. Please try a new search.")]
    NoResults,

    /// Provider-side failure.
    #[error("Oops! Server error. Please try again.")]
    ProviderUnavailable,

    /// Any other provider status, forwarded unchanged.
    #[error("Encountered an error. Please try again.")]
    Unexpected(u16),

    /// The request never produced a readable response.
    #[error("Encountered an error. Please try again.")]
    Transport(#[source] reqwest::Error),
}

impl CatalogError {
    /// Classify a non-success provider status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadQuery,
            401 => Self::RateLimited,
            404 => Self::NoResults,
            500 => Self::ProviderUnavailable,
            other => Self::Unexpected(other),
        }
    }

    /// HTTP status this error is reported under.
    pub fn status(&self) -> u16 {
        match self {
            Self::EmptyQuery | Self::BadQuery => 400,
            Self::RateLimited => 401,
            Self::NoResults => 404,
            Self::ProviderUnavailable | Self::Transport(_) => 500,
            Self::Unexpected(status) => *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_round_trips() {
        for status in [400, 401, 404, 500, 418] {
            assert_eq!(CatalogError::from_status(status).status(), status);
        }
        assert_eq!(CatalogError::EmptyQuery.status(), 400);
    }

    #[test]
    fn messages_are_fixed_per_kind() {
        assert_eq!(
            CatalogError::from_status(401).to_string(),
            "Please wait a few seconds and then try again!"
        );
        assert_eq!(
            CatalogError::from_status(404).to_string(),
            "Sorry! No food items were found. Please try a new search."
        );
        assert_eq!(
            CatalogError::from_status(500).to_string(),
            "Oops! Server error. Please try again."
        );
        assert_eq!(
            CatalogError::from_status(503).to_string(),
            "Encountered an error. Please try again."
        );
        assert_eq!(
            CatalogError::EmptyQuery.to_string(),
            "Search query must contain at least one character"
        );
    }
}

use pantry_model::{CreateListRequest, DeletedList, ErrorMessage, Item, ListResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures of an API call, in the form the UI reports them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error body; `message` is shown verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a decodable response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Typed client for the list API.
pub struct ListApi {
    base: Url,
    client: reqwest::Client,
}

impl ListApi {
    /// Build a client against the server's base URL (scheme and authority).
    pub fn new(base: Url) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    /// Join path segments onto the base URL. Segments are percent-encoded,
    /// so barcodes and queries cannot break out of their slot.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn fetch_lists(&self) -> Result<Vec<ListResponse>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "v1", "lists"]))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_list(
        &self,
        name: &str,
        items: Vec<Item>,
    ) -> Result<ListResponse, ClientError> {
        let body = CreateListRequest {
            name: name.to_string(),
            items,
        };
        let response = self
            .client
            .post(self.endpoint(&["api", "v1", "lists"]))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<DeletedList, ClientError> {
        let response = self
            .client
            .delete(self.endpoint(&["api", "v1", "lists", list_id]))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn add_item(&self, list_id: &str, item: &Item) -> Result<ListResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "v1", "lists", list_id, "items"]))
            .json(item)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn remove_item(
        &self,
        list_id: &str,
        barcode: &str,
    ) -> Result<ListResponse, ClientError> {
        let response = self
            .client
            .delete(self.endpoint(&["api", "v1", "lists", list_id, "items", barcode]))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Item>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "v1", "search", query]))
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a success body, or surface the server's error message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let message = response
        .json::<ErrorMessage>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_and_encodes_segments() {
        let api = ListApi::new(Url::parse("http://127.0.0.1:8000").unwrap());
        let url = api.endpoint(&["api", "v1", "search", "ice cream"]);
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/v1/search/ice%20cream"
        );
    }

    #[test]
    fn endpoint_respects_base_path() {
        let api = ListApi::new(Url::parse("http://127.0.0.1:8000/prefix/").unwrap());
        let url = api.endpoint(&["api", "v1", "lists"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/prefix/api/v1/lists");
    }
}

//! HTTP implementation of the image store client.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use super::{ImageStore, StoreError, StoredImage};

/// Client for the hosted image service.
///
/// `POST {base}/v1/images` with a multipart `file` field uploads;
/// `DELETE {base}/v1/images/{public_id}` removes. Both carry a bearer
/// key. No retries; failures surface to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    url: String,
    public_id: String,
}

impl HttpImageStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn images_url(&self) -> String {
        format!("{}/v1/images", self.base_url)
    }

    fn image_url(&self, public_id: &str) -> String {
        format!("{}/v1/images/{}", self.base_url, public_id)
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<StoredImage, StoreError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.images_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadBody = response.json().await?;
        tracing::debug!(public_id = %body.public_id, "uploaded image to remote store");

        Ok(StoredImage {
            url: body.url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.image_url(public_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        // Already gone is as good as deleted
        if !status.is_success() && status.as_u16() != 404 {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_building_strips_trailing_slash() {
        let store = HttpImageStore::new("https://img.example.com/", "key");
        assert_eq!(store.images_url(), "https://img.example.com/v1/images");
        assert_eq!(
            store.image_url("abc123"),
            "https://img.example.com/v1/images/abc123"
        );
    }
}

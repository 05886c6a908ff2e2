//! Object storage: gallery file upload and public URLs

use crate::ClientResult;
use crate::http::RestClient;

impl RestClient {
    /// Store `bytes` at `path` inside `bucket`. Returns the stored path.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<String> {
        tracing::debug!(bucket, path, size = bytes.len(), "upload");
        let request = self
            .http()
            .post(self.url(&format!("storage/v1/object/{bucket}/{path}")))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        let response = self.authorize(request).await.send().await?;
        Self::handle_empty(response).await?;
        Ok(path.to_string())
    }

    /// Publicly reachable URL of a stored object. Purely computed, no request.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.url(&format!("storage/v1/object/public/{bucket}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientConfig, RestClient};

    #[test]
    fn test_public_url() {
        let config = ClientConfig::new("https://salon.example.co/", "anon").unwrap();
        let client = RestClient::new(config).unwrap();
        assert_eq!(
            client.public_url("images", "gallery/abc.png"),
            "https://salon.example.co/storage/v1/object/public/images/gallery/abc.png"
        );
    }
}

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::Deserialize;

pub const DEFAULT_GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_LOGIN_BASE: &str = "https://login.microsoftonline.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

#[derive(Debug, Clone)]
pub struct GraphCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct GraphEndpoints {
    pub graph_base: String,
    pub login_base: String,
}

/// Location of a drive item, used to upload back to the same file.
#[derive(Debug, Clone)]
pub struct DriveItemRef {
    pub drive_id: String,
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveItemMeta {
    id: String,
    parent_reference: ParentReference,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParentReference {
    drive_id: String,
}

/// Sharing URLs are addressed through the shares API as `u!` plus the
/// unpadded URL-safe base64 of the URL.
pub fn encode_sharing_url(url: &str) -> String {
    let b64 = BASE64_STANDARD.encode(url.as_bytes());
    format!(
        "u!{}",
        b64.trim_end_matches('=').replace('/', "_").replace('+', "-")
    )
}

/// Authenticated Microsoft Graph client scoped to a single copy operation.
pub struct GraphClient {
    http: reqwest::Client,
    graph_base: String,
    token: String,
}

impl GraphClient {
    /// Acquire a client-credentials token and return a ready client.
    pub async fn connect(
        http: reqwest::Client,
        endpoints: &GraphEndpoints,
        credentials: &GraphCredentials,
    ) -> Result<Self> {
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            endpoints.login_base, credentials.tenant_id
        );
        let response = http
            .post(&token_url)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("scope", GRAPH_SCOPE),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .context("token request failed")?
            .error_for_status()
            .context("token endpoint rejected the request")?;
        let token: TokenResponse = response
            .json()
            .await
            .context("malformed token response")?;

        Ok(Self {
            http,
            graph_base: endpoints.graph_base.clone(),
            token: token.access_token,
        })
    }

    /// Download the raw content of a file addressed by sharing URL.
    pub async fn download_shared_content(&self, sharing_url: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/shares/{}/driveItem/content",
            self.graph_base,
            encode_sharing_url(sharing_url)
        );
        let response = self.get(&url).await?;
        Ok(response
            .bytes()
            .await
            .context("failed to read shared item content")?
            .to_vec())
    }

    /// Resolve a sharing URL to its driveId/itemId so the rewritten document
    /// can be uploaded back over the same item.
    pub async fn shared_drive_item(&self, sharing_url: &str) -> Result<DriveItemRef> {
        let url = format!(
            "{}/shares/{}/driveItem",
            self.graph_base,
            encode_sharing_url(sharing_url)
        );
        let meta: DriveItemMeta = self
            .get(&url)
            .await?
            .json()
            .await
            .context("malformed driveItem metadata")?;
        Ok(DriveItemRef {
            drive_id: meta.parent_reference.drive_id,
            item_id: meta.id,
        })
    }

    pub async fn download_item_content(&self, item: &DriveItemRef) -> Result<Vec<u8>> {
        let url = format!(
            "{}/drives/{}/items/{}/content",
            self.graph_base, item.drive_id, item.item_id
        );
        let response = self.get(&url).await?;
        Ok(response
            .bytes()
            .await
            .context("failed to read item content")?
            .to_vec())
    }

    /// Overwrite the drive item's content.
    pub async fn upload_item_content(&self, item: &DriveItemRef, content: Vec<u8>) -> Result<()> {
        let url = format!(
            "{}/drives/{}/items/{}/content",
            self.graph_base, item.drive_id, item.item_id
        );
        self.http
            .put(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await
            .context("upload request failed")?
            .error_for_status()
            .with_context(|| format!("upload to drive item {} failed", item.item_id))?;
        Ok(())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharing_url_encoding_is_unpadded_and_url_safe() {
        assert_eq!(encode_sharing_url("abc"), "u!YWJj");

        let encoded = encode_sharing_url(
            "https://contoso.sharepoint.com/:x:/s/finance/EZq?e=4%3Aabc&at=9",
        );
        assert!(encoded.starts_with("u!"));
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('+'));
    }
}

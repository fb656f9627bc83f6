use super::http_client::{build_client, scalar_field, trim_base_url};
use crate::compat_check::domain::RemoteMetadata;
use crate::ports::outbound::{CoreVersionSource, PluginMetadataRepository};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Public WordPress.org API root
pub const DEFAULT_WPORG_API_URL: &str = "https://api.wordpress.org";

const CORE_VERSION_TIMEOUT: Duration = Duration::from_secs(15);
const PLUGIN_INFO_TIMEOUT: Duration = Duration::from_secs(20);

/// WpOrgClient adapter for the WordPress.org core and plugin APIs
///
/// Implements both [`CoreVersionSource`] and [`PluginMetadataRepository`].
/// Every failure is logged and replaced by the port's fallback value; the
/// client never retries.
pub struct WpOrgClient {
    client: reqwest::Client,
    base_url: String,
}

impl WpOrgClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_WPORG_API_URL)
    }

    /// Creates a client against another API root (mirrors, tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(PLUGIN_INFO_TIMEOUT)?,
            base_url: trim_base_url(base_url),
        })
    }

    async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("WordPress.org API returned status code {}", response.status());
        }
        Ok(response.json().await?)
    }

    async fn fetch_core_version(&self) -> Result<String> {
        let url = format!("{}/core/version-check/1.7/", self.base_url);
        let body = self.get_json(&url, CORE_VERSION_TIMEOUT).await?;
        body.pointer("/offers/0/version")
            .and_then(Value::as_str)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("version-check response has no offers[0].version"))
    }

    async fn fetch_plugin_info(&self, slug: &str) -> Result<RemoteMetadata> {
        let url = format!(
            "{}/plugins/info/1.2/?action=plugin_information&request[slug]={}",
            self.base_url,
            urlencoding::encode(slug)
        );
        let body = self.get_json(&url, PLUGIN_INFO_TIMEOUT).await?;

        if !body.is_object() {
            anyhow::bail!("plugin information response is not an object");
        }
        if let Some(error) = body.get("error") {
            anyhow::bail!("plugin information API reported an error: {}", error);
        }

        Ok(RemoteMetadata {
            tested_up_to_core_version: scalar_field(&body, "tested"),
            latest_version: scalar_field(&body, "version"),
            support_threads_total: scalar_field(&body, "support_threads"),
            support_threads_resolved: scalar_field(&body, "support_threads_resolved"),
            requires_php: scalar_field(&body, "requires_php"),
        })
    }
}

#[async_trait]
impl CoreVersionSource for WpOrgClient {
    async fn latest_core_version(&self, local_version: &str) -> String {
        match self.fetch_core_version().await {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(error = %e, "WordPress core version check failed, using local version");
                local_version.to_string()
            }
        }
    }
}

#[async_trait]
impl PluginMetadataRepository for WpOrgClient {
    async fn fetch_metadata(&self, slug: &str) -> RemoteMetadata {
        if slug.is_empty() {
            return RemoteMetadata::empty();
        }
        match self.fetch_plugin_info(slug).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(slug, error = %e, "plugin information lookup failed");
                RemoteMetadata::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat_check::domain::NO_DATA;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> WpOrgClient {
        WpOrgClient::with_base_url(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_latest_core_version_from_first_offer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/version-check/1.7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "offers": [{"version": "6.5.2"}, {"version": "6.4.4"}]
            })))
            .mount(&server)
            .await;

        let version = client_for(&server).await.latest_core_version("6.4.3").await;
        assert_eq!(version, "6.5.2");
    }

    #[tokio::test]
    async fn test_latest_core_version_falls_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/version-check/1.7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"offers": []})))
            .mount(&server)
            .await;

        let version = client_for(&server).await.latest_core_version("6.4.3").await;
        assert_eq!(version, "6.4.3");
    }

    #[tokio::test]
    async fn test_fetch_metadata_reads_mixed_field_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plugins/info/1.2/"))
            .and(query_param("action", "plugin_information"))
            .and(query_param("request[slug]", "akismet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tested": "6.5.2",
                "version": "5.3.1",
                "support_threads": 12,
                "support_threads_resolved": 4,
                "requires_php": "7.2"
            })))
            .mount(&server)
            .await;

        let metadata = client_for(&server).await.fetch_metadata("akismet").await;

        assert_eq!(metadata.tested_wp(), "6.5.2");
        assert_eq!(metadata.latest_version(), "5.3.1");
        assert_eq!(metadata.support_total(), "12");
        assert_eq!(metadata.support_resolved(), "4");
        assert_eq!(metadata.requires_php(), "7.2");
    }

    #[tokio::test]
    async fn test_fetch_metadata_error_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plugins/info/1.2/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "Plugin not found."})),
            )
            .mount(&server)
            .await;

        let metadata = client_for(&server).await.fetch_metadata("missing").await;

        assert!(metadata.is_empty());
        assert_eq!(metadata.latest_version(), NO_DATA);
    }

    #[tokio::test]
    async fn test_fetch_metadata_server_error_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let metadata = client_for(&server).await.fetch_metadata("akismet").await;
        assert!(metadata.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_metadata_empty_slug_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let metadata = client_for(&server).await.fetch_metadata("").await;
        assert!(metadata.is_empty());
    }
}

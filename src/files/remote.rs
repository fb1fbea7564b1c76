use std::time::Duration;

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
};

use crate::{config::Fetch, error::FetchError, models::FetchedImage};

const ACCEPT_IMAGES: &str = "image/*,*/*;q=0.8";

/// Maps an image content type to a file extension, `jpg` when unknown.
/// Subtypes are matched by substring so variants like `apng` still map.
pub(crate) fn extension_for(content_type: &str) -> &'static str {
    let subtype = match content_type.parse::<mime::Mime>() {
        Ok(parsed) => parsed.subtype().as_str().to_lowercase(),
        Err(_) => content_type.to_lowercase(),
    };

    if subtype.contains("png") {
        "png"
    } else if subtype.contains("jpeg") {
        "jpg"
    } else if subtype.contains("gif") {
        "gif"
    } else if subtype.contains("webp") {
        "webp"
    } else {
        "jpg"
    }
}

#[derive(Clone, Debug)]
pub struct ImageFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl ImageFetcher {
    pub(crate) fn new(client: Client, fetch: &Fetch) -> Self {
        Self {
            client,
            user_agent: fetch.user_agent.clone(),
            timeout: Duration::from_secs(fetch.timeout),
        }
    }

    pub(crate) async fn try_fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, ACCEPT_IMAGES)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        if !content_type.starts_with("image/") {
            return Err(FetchError::NotAnImage(content_type));
        }

        let bytes = response.bytes().await?.to_vec();
        let extension = extension_for(&content_type);

        Ok(FetchedImage {
            bytes,
            content_type,
            extension,
        })
    }

    /// Fetches `url` as an image. Any failure is logged and yields `None`.
    pub(crate) async fn fetch(&self, url: &str) -> Option<FetchedImage> {
        match self.try_fetch(url).await {
            Ok(image) => {
                log::debug!(
                    "Fetched {} ({}, {} bytes)",
                    url,
                    image.content_type,
                    image.bytes.len()
                );
                Some(image)
            }
            Err(err) => {
                log::debug!("Skipping {}: {}", url, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn fetcher() -> ImageFetcher {
        ImageFetcher::new(Client::new(), &Config::default().fetch)
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/gif"), "gif");
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("image/webp; charset=binary"), "webp");
        assert_eq!(extension_for("image/avif"), "jpg");
        assert_eq!(extension_for("image/"), "jpg");
        assert_eq!(extension_for("garbage"), "jpg");
    }

    #[test]
    fn test_extension_variants_and_unparsable_parameters() {
        assert_eq!(extension_for("image/apng"), "png");
        assert_eq!(extension_for("image/vnd.mozilla.apng"), "png");
        assert_eq!(extension_for("image/x-png"), "png");
        assert_eq!(extension_for("image/png; foo"), "png");
        assert_eq!(extension_for("image/gif; ;"), "gif");
        assert_eq!(extension_for("image/svg+xml"), "jpg");
    }

    #[tokio::test]
    async fn test_fetches_image() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/spider.png")
            .match_header("user-agent", "Mozilla/5.0")
            .match_header("accept", ACCEPT_IMAGES)
            .with_status(200)
            .with_header("content-type", "Image/PNG")
            .with_body([0x89, b'P', b'N', b'G'])
            .create_async()
            .await;

        let image = fetcher()
            .fetch(&format!("{}/spider.png", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_follows_redirects() {
        let mut server = mockito::Server::new_async().await;
        let target = format!("{}/new.webp", server.url());
        server
            .mock("GET", "/old")
            .with_status(302)
            .with_header("location", &target)
            .create_async()
            .await;
        server
            .mock("GET", "/new.webp")
            .with_status(200)
            .with_header("content-type", "image/webp")
            .with_body("RIFF")
            .create_async()
            .await;

        let image = fetcher()
            .fetch(&format!("{}/old", server.url()))
            .await
            .unwrap();
        assert_eq!(image.extension, "webp");
    }

    #[tokio::test]
    async fn test_html_is_not_an_image() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let result = fetcher()
            .try_fetch(&format!("{}/page", server.url()))
            .await;
        assert!(matches!(result, Err(FetchError::NotAnImage(ct)) if ct == "text/html"));
    }

    #[tokio::test]
    async fn test_error_status_yields_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone.jpg")
            .with_status(404)
            .with_header("content-type", "image/jpeg")
            .create_async()
            .await;

        let fetcher = fetcher();
        let url = format!("{}/gone.jpg", server.url());
        assert!(matches!(
            fetcher.try_fetch(&url).await,
            Err(FetchError::Status(status)) if status.as_u16() == 404
        ));
        assert!(fetcher.fetch(&url).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        assert!(fetcher().fetch("http://127.0.0.1:9/spider.jpg").await.is_none());
    }
}

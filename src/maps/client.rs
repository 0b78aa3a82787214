use crate::app_config::AppConfig;
use reqwest::{Client, header};
use thiserror::Error;

pub fn new_client(config: &AppConfig) -> Result<Client, MapsClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.maps().request_timeout())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum MapsClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;

    #[tokio::test]
    async fn new_client_sets_the_user_agent_and_accept_headers() -> Result<(), MapsClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .match_header("user-agent", concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .match_header("accept", "application/json")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().maps_url(server.url()).build();
        let client = new_client(&config)?;

        client.get(format!("{}{}", server.url(), "/")).send().await?;

        // Verify that the call came in with both headers
        mock.assert();

        Ok(())
    }
}

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use twilight_http::client::ClientBuilder;
use twilight_http::Client as HttpClient;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;

use crate::Error;

pub fn build_http_client(token: &str) -> Arc<HttpClient> {
    Arc::new(
        ClientBuilder::new()
            .token(token.to_string())
            .timeout(Duration::from_secs(30))
            .build(),
    )
}

/// Resolves the bot's application ID, which also proves the token works.
pub async fn fetch_application_id(http: &HttpClient) -> Result<Id<ApplicationMarker>, Error> {
    let application = http
        .current_user_application()
        .await
        .map_err(|e| Error::Auth(format!("Discord: error fetching application => {e}")))?
        .model()
        .await
        .map_err(|e| Error::Auth(format!("Discord: error parsing application => {e}")))?;

    info!("Discord application '{}' (ID={})", application.name, application.id);
    Ok(application.id)
}

use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use serde_json::Value;

use super::http_client::HttpsConnector;
use crate::domain::credentials::CredentialRecord;
use crate::ports::spreadsheet_client::SheetsError;

/// Builds the service account key expected by the OAuth2 flow. Key files exported without
/// a `token_uri` get Google's default token endpoint.
pub fn service_account_key(
    credentials: &CredentialRecord,
) -> error_stack::Result<oauth2::ServiceAccountKey, SheetsError> {
    let mut document = serde_json::to_value(credentials).change_context(SheetsError::Credentials)?;
    if let Value::Object(fields) = &mut document {
        fields.insert(
            "token_uri".to_string(),
            Value::String(credentials.token_uri().to_string()),
        );
    }
    serde_json::from_value(document).change_context(SheetsError::Credentials)
}

pub async fn auth(
    credentials: &CredentialRecord,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, SheetsError> {
    let secret = service_account_key(credentials)?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SheetsError::Auth)
        .attach_printable_lazy(|| {
            format!(
                "could not create an authenticator for {}",
                credentials.client_email
            )
        })
}

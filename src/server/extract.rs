use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};

use super::error::AppError;
use crate::domain::submission::FormSubmission;

enum BodyKind {
    Json,
    UrlEncoded,
    Multipart,
    Other,
}

fn body_kind(request: &Request) -> BodyKind {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or_default().trim();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::UrlEncoded
    } else if mime == "multipart/form-data" {
        BodyKind::Multipart
    } else {
        BodyKind::Other
    }
}

/// Named text parts of a multipart body, in order. File uploads are skipped.
async fn text_parts(mut multipart: Multipart) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(AppError::internal)? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(AppError::internal)?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// A form submission sent as JSON, url-encoded or multipart. Other bodies yield an empty
/// submission, which then fails validation.
pub struct Submission(pub FormSubmission);

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let submission = match body_kind(&req) {
            BodyKind::Json => {
                let Json(submission) = Json::<FormSubmission>::from_request(req, state)
                    .await
                    .map_err(AppError::internal)?;
                submission
            }
            BodyKind::UrlEncoded => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(AppError::internal)?;
                FormSubmission::from_pairs(pairs)
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(AppError::internal)?;
                FormSubmission::from_pairs(text_parts(multipart).await?)
            }
            BodyKind::Other => FormSubmission::default(),
        };
        Ok(Submission(submission))
    }
}

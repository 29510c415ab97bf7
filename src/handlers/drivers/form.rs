use async_trait::async_trait;
use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};

use crate::api::{DriverPayload, PhotoUpload};
use crate::error::ApiError;

pub const PHOTO_FIELD: &str = "profile_photo";

/// Driver create/update body: `multipart/form-data` with an optional
/// `profile_photo` file part, or a plain JSON object with the same fields.
#[derive(Debug, Default)]
pub struct DriverForm {
    pub payload: DriverPayload,
    pub photo: Option<PhotoUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for DriverForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Json(payload) = Json::<DriverPayload>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
            Ok(Self { payload, photo: None })
        }
    }
}

impl DriverForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == PHOTO_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;

                // Browsers send an empty part when no file was chosen
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if form.photo.is_some() {
                    return Err(ApiError::bad_request("Only one profile_photo file is accepted"));
                }
                form.photo = Some(PhotoUpload { file_name, bytes });
            } else {
                let value = field.text().await.map_err(bad_multipart)?;
                form.payload.set_field(&name, value);
            }
        }

        Ok(form)
    }
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::bad_request(err.body_text())
}

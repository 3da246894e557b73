//! Decoding of the create and delete form bodies.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::Form;
use carlot_types::{Attachment, CarForm, CarId};

use crate::error::{ServerError, ServerResult};

/// Multipart names of the image part (current and legacy).
const IMAGE_FIELDS: [&str; 2] = ["image", "HinhDaiDien"];

/// A decoded create-car submission.
#[derive(Debug, Default)]
pub struct CarUpload {
    pub form: CarForm,
    pub attachment: Option<Attachment>,
}

/// Read the create form: text fields into [`CarForm`], the image part into
/// an [`Attachment`].
///
/// A file part with an empty filename is what browsers send when no file was
/// chosen; it is treated as no attachment. Unknown fields are skipped.
pub async fn read_car_upload(mut multipart: Multipart) -> ServerResult<CarUpload> {
    let mut upload = CarUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if IMAGE_FIELDS.contains(&name.as_str()) {
            let filename = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = field.bytes().await?;
            if filename.is_empty() {
                continue;
            }
            upload.attachment = Some(Attachment::new(filename, content_type, bytes));
        } else {
            let value = field.text().await?;
            if !upload.form.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(upload)
}

/// Read the ids named by a delete form.
///
/// Every field *name* is an id (checkbox `name="<id>"`); values are ignored.
/// Both urlencoded and multipart bodies are accepted. A request without a
/// content type carries no ids.
pub async fn read_delete_ids(request: Request) -> ServerResult<Vec<CarId>> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let names: Vec<String> = if content_type.is_empty() {
        Vec::new()
    } else if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?;
        let mut names = Vec::new();
        while let Some(field) = multipart.next_field().await? {
            if let Some(name) = field.name() {
                names.push(name.to_owned());
            }
        }
        names
    } else {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?;
        pairs.into_iter().map(|(name, _)| name).collect()
    };

    Ok(names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(CarId::from_string)
        .collect())
}

use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use services::ticket_update::{ATTACHMENT_FIELD, TicketSubmission, UploadedFile};

/// Reads a ticket update from either an urlencoded or a multipart body.
///
/// Multipart file parts named `attachment` become uploads; every other part
/// is treated as a text field.
pub struct SubmissionForm(pub TicketSubmission);

impl<S> FromRequest<S> for SubmissionForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(TicketSubmission::from_pairs(pairs)));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let mut submission = TicketSubmission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_owned) {
                Some(filename) if name == ATTACHMENT_FIELD => {
                    let content_type = field
                        .content_type()
                        .map(str::to_owned)
                        .unwrap_or_else(|| {
                            mime_guess::from_path(&filename)
                                .first_or_octet_stream()
                                .to_string()
                        });
                    let data = field.bytes().await.map_err(IntoResponse::into_response)?;
                    submission.add_file(UploadedFile {
                        filename,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                Some(_) => {
                    tracing::debug!(field = %name, "Ignoring unexpected file part");
                }
                None => {
                    let value = field.text().await.map_err(IntoResponse::into_response)?;
                    submission.insert_field(name, value);
                }
            }
        }

        Ok(Self(submission))
    }
}

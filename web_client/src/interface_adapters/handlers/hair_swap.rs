use crate::domain::ImageUpload;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{HairSwapFailure, HairSwapForm, HairSwapUseCase};
use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::header,
    response::{IntoResponse, Response},
};
use common::{ErrorResponse, FieldError, ServiceError};

const RESOURCE: &str = "HairSwapRequest";

fn multipart_error(status: axum::http::StatusCode, detail: String) -> ServiceError {
    ServiceError::declared(
        status,
        ErrorResponse::single(FieldError::new("request", "body", detail)),
    )
}

fn from_rejection(rejection: MultipartRejection) -> ServiceError {
    multipart_error(rejection.status(), rejection.body_text())
}

fn from_field_error(err: MultipartError) -> ServiceError {
    multipart_error(err.status(), err.body_text())
}

async fn read_form(mut multipart: Multipart) -> Result<HairSwapForm, ServiceError> {
    let mut form = HairSwapForm::default();

    while let Some(field) = multipart.next_field().await.map_err(from_field_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "hairStyleUrl" => {
                form.hair_style_url = Some(field.text().await.map_err(from_field_error)?);
            }
            "hairColorUrl" => {
                form.hair_color_url = Some(field.text().await.map_err(from_field_error)?);
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(from_field_error)?;
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            // Unknown fields are drained and ignored.
            _ => {}
        }
    }

    Ok(form)
}

#[tracing::instrument(name = "swap_hair", skip_all)]
pub async fn swap_hair(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ServiceError> {
    let form = read_form(multipart.map_err(from_rejection)?).await?;

    let use_case = HairSwapUseCase {
        swapper: state.hair_swapper.clone(),
    };
    let image = use_case.execute(form).await.map_err(map_swap_failure)?;

    tracing::info!(bytes = image.bytes.len(), "hair swap completed");

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}

fn map_swap_failure(failure: HairSwapFailure) -> ServiceError {
    match failure {
        HairSwapFailure::MissingFields(missing) => {
            let errors = missing
                .into_iter()
                .map(|field| FieldError::new(RESOURCE, field, format!("{field} is required")))
                .collect();
            match ErrorResponse::from_errors(errors) {
                Some(body) => ServiceError::bad_request(body),
                None => ServiceError::unexpected("hair swap form rejected without missing fields"),
            }
        }
        HairSwapFailure::Upstream(err) => {
            tracing::warn!(error = %err, "hair swap upstream failed");
            ServiceError::bad_gateway(ErrorResponse::single(FieldError::new(
                RESOURCE,
                "image",
                "hair swap failed",
            )))
        }
    }
}

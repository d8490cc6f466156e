use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use staffroll_core::AppError;

mod types;

pub use types::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.0.to_string();
        let errors = match self.0 {
            AppError::InvalidFields(errors) => Some(errors.as_map().clone()),
            _ => None,
        };

        (status, Json(ErrorResponse::new(message, errors))).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use staffroll_core::{AppError, FieldErrors};

    use super::ApiError;

    #[test]
    fn invalid_fields_map_to_unprocessable_entity() {
        let mut errors = FieldErrors::default();
        errors.push("first_name", "The first name field is required.");

        let response = ApiError(AppError::InvalidFields(errors)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflicts_and_missing_rows_keep_their_status() {
        let conflict = ApiError(AppError::Conflict("in use".to_owned())).into_response();
        let missing = ApiError(AppError::NotFound("gone".to_owned())).into_response();

        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

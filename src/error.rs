use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        store_read_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorizor_error(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            STORE_READ | STORE_WRITE => StatusCode::INTERNAL_SERVER_ERROR,
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            UNAUTHENTICATED | INVALID_CREDENTIALS => StatusCode::UNAUTHORIZED,
            ACCESS_DENIED => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_validation_error(&self) -> bool {
        self.code == VALIDATION
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == INVALID_INPUT
    }

    pub fn is_store_read_error(&self) -> bool {
        self.code == STORE_READ
    }

    pub fn is_access_denied_error(&self) -> bool {
        self.code == ACCESS_DENIED
    }

    pub fn is_unauthenticated_error(&self) -> bool {
        self.code == UNAUTHENTICATED
    }

    pub fn is_invalid_credentials_error(&self) -> bool {
        self.code == INVALID_CREDENTIALS
    }

    pub fn is_config_error(&self) -> bool {
        self.code == CONFIG
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self.code {
            1..=99 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

const CONFIG: i32 = 1;
const AUTHORIZOR: i32 = 2;
const UNEXPECTED: i32 = 5;

const VALIDATION: i32 = 100;
const INVALID_INPUT: i32 = 101;
const STORE_READ: i32 = 110;
const STORE_WRITE: i32 = 111;
const UNAUTHENTICATED: i32 = 120;
const INVALID_CREDENTIALS: i32 = 121;
const ACCESS_DENIED: i32 = 122;

pub fn validation_error() -> Error {
    Error {
        code: VALIDATION,
        message: "Please fill all fields.".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn store_read_error<T: Debug>(err: T) -> Error {
    tracing::warn!("failed to read bookings: {:?}", err);

    Error {
        code: STORE_READ,
        message: "Could not read bookings.".into(),
    }
}

pub fn store_write_error<T: Debug>(err: T) -> Error {
    tracing::warn!("failed to write bookings: {:?}", err);

    Error {
        code: STORE_WRITE,
        message: "Could not save bookings.".into(),
    }
}

pub fn unauthenticated_error() -> Error {
    Error {
        code: UNAUTHENTICATED,
        message: "Login required to access features".into(),
    }
}

pub fn invalid_credentials_error() -> Error {
    Error {
        code: INVALID_CREDENTIALS,
        message: "Username/password is incorrect".into(),
    }
}

pub fn access_denied_error() -> Error {
    Error {
        code: ACCESS_DENIED,
        message: "Access denied! Admins only.".into(),
    }
}

pub fn config_error<T: Debug>(err: T) -> Error {
    Error {
        code: CONFIG,
        message: format!("configuration error: {:?}", err),
    }
}

pub fn authorizor_error<T: Debug>(_: T) -> Error {
    Error {
        code: AUTHORIZOR,
        message: "authorizor error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}

#[test]
fn status_mapping_test() {
    assert_eq!(validation_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(invalid_input_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(store_read_error("io").status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(unauthenticated_error().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_credentials_error().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(access_denied_error().status(), StatusCode::FORBIDDEN);
    assert_eq!(unexpected_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

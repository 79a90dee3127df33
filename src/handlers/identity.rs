//! Verified caller identity, injected by the upstream auth gateway.
//!
//! Token verification happens before requests reach this service; the
//! gateway forwards the outcome as plain headers. Handlers receive the
//! result as a typed extractor argument instead of fishing untyped values
//! out of request extensions.

use std::future::{ready, Ready};
use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Seller,
    Customer,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            "customer" => Ok(Role::Customer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<Identity, AppError> {
    let user_id = header_value(req, USER_ID_HEADER)
        .and_then(|v| v.parse::<i32>().ok())
        .ok_or(AppError::Unauthorized)?;

    // A missing role downgrades to customer; a garbled one is rejected.
    let role = match header_value(req, ROLE_HEADER) {
        Some(v) => v.parse().map_err(|()| AppError::Unauthorized)?,
        None => Role::Customer,
    };

    Ok(Identity { user_id, role })
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::FromRequest;

    use super::*;

    #[actix_web::test]
    async fn extracts_user_id_and_role() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "7"))
            .insert_header((ROLE_HEADER, "seller"))
            .to_http_request();

        let identity = Identity::extract(&req).await.unwrap();

        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.role, Role::Seller);
    }

    #[actix_web::test]
    async fn missing_user_id_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let err = Identity::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[actix_web::test]
    async fn non_numeric_user_id_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "abc"))
            .to_http_request();

        let err = Identity::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[actix_web::test]
    async fn missing_role_defaults_to_customer() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "7"))
            .to_http_request();

        let identity = Identity::extract(&req).await.unwrap();

        assert_eq!(identity.role, Role::Customer);
    }

    #[actix_web::test]
    async fn unknown_role_is_rejected() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "7"))
            .insert_header((ROLE_HEADER, "superuser"))
            .to_http_request();

        let err = Identity::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }
}

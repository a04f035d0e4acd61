//! JWT extraction middleware.
//!
//! Reads the `Authorization: Bearer` header, verifies the token and stores
//! its `BackendClaims` in request extensions. Wrapped around protected
//! scopes only; anything without a valid token gets a 401 problem response,
//! rendered here so it still passes through the outer middleware.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match bearer_token(req.headers().get(header::AUTHORIZATION)) {
            Ok(token) => token,
            Err(err) => return reject(req, err),
        };

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return reject(req, AppError::internal("AppState missing from request"));
        };

        match verify_access_token(&token, &state.security) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => reject(req, err),
        }
    }
}

/// The response is built when the future is polled, inside the request's
/// trace scope, so the problem body carries the request's trace id.
fn reject<B: 'static>(
    req: ServiceRequest,
    err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) })
}

fn bearer_token(value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let raw = value
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

//! Admin key middleware for Actix Web.
//!
//! The catalog endpoints are shared between the public listing pages, which only read, and the admin panel, which also
//! writes. When an admin key is configured, this middleware requires the catalog writes (POST, PUT and DELETE) to
//! present the key in the `ldg_admin_key` header. Other verbs pass through untouched, so unsupported ones still get a
//! 405.
//!
//! If no key is configured, the middleware lets every request through.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error,
};
use futures::future::LocalBoxFuture;
use ldg_common::Secret;
use log::{trace, warn};
use subtle::ConstantTimeEq;

use crate::errors::ServerError;

pub const ADMIN_KEY_HEADER: &str = "ldg_admin_key";

pub struct AdminKeyMiddlewareFactory {
    key: Option<Secret<String>>,
}

impl AdminKeyMiddlewareFactory {
    pub fn new(key: Option<Secret<String>>) -> Self {
        AdminKeyMiddlewareFactory { key }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminKeyMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = AdminKeyMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminKeyMiddlewareService { key: self.key.clone(), service: Rc::new(service) }))
    }
}

pub struct AdminKeyMiddlewareService<S> {
    key: Option<Secret<String>>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let key = self.key.clone();
        Box::pin(async move {
            let key = match key {
                Some(k) if requires_key(req.method()) => k,
                _ => return service.call(req).await,
            };
            trace!("🔐️ Checking admin key for {} {}", req.method(), req.path());
            let supplied = req.headers().get(ADMIN_KEY_HEADER).map(|v| v.as_bytes()).unwrap_or_default();
            if key_matches(key.reveal().as_bytes(), supplied) {
                trace!("🔐️ Admin key check for request ✅️");
                service.call(req).await
            } else {
                warn!("🔐️ Missing or invalid admin key for {} {}. Denying access.", req.method(), req.path());
                Err(ServerError::InsufficientPermissions("A valid admin key is required.".into()).into())
            }
        })
    }
}

fn requires_key(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

fn key_matches(expected: &[u8], supplied: &[u8]) -> bool {
    !supplied.is_empty() && bool::from(expected.ct_eq(supplied))
}

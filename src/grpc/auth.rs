use crate::api::Identity;
use crate::constants::USER_ID_HEADER;
use tonic::{Request, Status};

/// Interceptor accepting only calls that carry an upstream-resolved identity.
pub fn check_auth(mut req: Request<()>) -> Result<Request<()>, Status> {
    let user_id = req
        .metadata()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(Identity::new(user_id));
            Ok(req)
        }
        None => Err(Status::unauthenticated(format!(
            "missing {} metadata",
            USER_ID_HEADER
        ))),
    }
}

pub fn identity_of<T>(request: &Request<T>) -> Result<Identity, Status> {
    request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| Status::unauthenticated("request was not authenticated"))
}

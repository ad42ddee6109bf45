use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use storage::dto::actor::{Actor, ActorRole};
use uuid::Uuid;

use crate::error::WebError;

/// Actor context propagated by the authentication gateway in front of this
/// service. The gateway resolves the session and forwards the caller's
/// identity and scope as headers; this extractor only materializes them.
pub struct ActorContext(pub Actor);

const ACTOR_ID: &str = "x-actor-id";
const ACTOR_ROLE: &str = "x-actor-role";
const ACTOR_EVENT: &str = "x-actor-event";
const ACTOR_INSTITUTION: &str = "x-actor-institution";

#[async_trait]
impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = required_uuid(parts, ACTOR_ID)?;
        let role = match header_str(parts, ACTOR_ROLE) {
            Some("staff") => ActorRole::Staff,
            Some("institution") => ActorRole::Institution,
            _ => {
                tracing::warn!("request without a valid {} header", ACTOR_ROLE);
                return Err(WebError::Unauthorized);
            }
        };
        let event_id = optional_uuid(parts, ACTOR_EVENT)?;
        let institution_id = optional_uuid(parts, ACTOR_INSTITUTION)?;

        Ok(ActorContext(Actor {
            user_id,
            role,
            event_id,
            institution_id,
        }))
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn required_uuid(parts: &Parts, name: &str) -> Result<Uuid, WebError> {
    header_str(parts, name)
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(WebError::Unauthorized)
}

fn optional_uuid(parts: &Parts, name: &str) -> Result<Option<Uuid>, WebError> {
    match header_str(parts, name) {
        None => Ok(None),
        Some(v) => Uuid::parse_str(v)
            .map(Some)
            .map_err(|_| WebError::Unauthorized),
    }
}

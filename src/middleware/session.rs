use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    store::Session,
};

/// The caller's session, inserted into request extensions by [`require_session`]
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub token: Uuid,
    pub session: Session,
}

impl AuthSession {
    pub fn username(&self) -> &str {
        &self.session.username
    }
}

/// Parses `Authorization: Bearer <token>`
fn bearer_token(request: &Request) -> Option<Uuid> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?;
    Uuid::parse_str(token.trim()).ok()
}

/// Rejects requests without a live session
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

    let session = state
        .sessions
        .get(&token)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or unknown".to_string()))?;

    request
        .extensions_mut()
        .insert(AuthSession { token, session });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(value: &str) -> Request {
        axum::http::Request::builder()
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_bearer_token_parsed() {
        let token = Uuid::new_v4();
        assert_eq!(bearer_token(&request_with(&format!("Bearer {}", token))), Some(token));
    }

    #[test]
    fn test_bad_authorization_rejected() {
        assert_eq!(bearer_token(&request_with("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&request_with("Bearer nope")), None);
        let request = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&request), None);
    }
}

use crate::auth::access_key::{extract_key_prefix, verify_access_key, ACCESS_KEY_PREFIX};
use crate::auth::models::UserContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use postroom_core::AppError;
use postroom_db::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Sliding-window counter of failed authentication attempts per client IP.
#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Record a failure; returns true when the IP has reached the limit.
    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        let (count, reset_at) = guard
            .entry(ip.to_string())
            .or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub user_repository: UserRepository,
    pub auth_failure_limiter: Option<Arc<AuthFailureLimiter>>,
}

/// Best-effort client IP: first X-Forwarded-For hop, then the socket address.
fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            request
                .extensions()
                .get::<std::net::SocketAddr>()
                .map(|addr| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let client_ip = client_ip(&request);
    if let Some(ref limiter) = auth_state.auth_failure_limiter {
        if limiter.is_blocked(&client_ip).await {
            return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                .into_response();
        }
    }

    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            if let Some(ref limiter) = auth_state.auth_failure_limiter {
                if limiter.record_failure(&client_ip).await {
                    return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                        .into_response();
                }
            }
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    if !auth_header.starts_with("Bearer ") {
        if let Some(ref limiter) = auth_state.auth_failure_limiter {
            if limiter.record_failure(&client_ip).await {
                return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                    .into_response();
            }
        }
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    if token.starts_with(ACCESS_KEY_PREFIX) {
        match authenticate_access_key(token, &auth_state.user_repository).await {
            Ok(user_context) => {
                tracing::debug!(user_id = %user_context.user_id, "Access key accepted");
                request.extensions_mut().insert(user_context);
                return next.run(request).await;
            }
            Err(e) => {
                if let Some(ref limiter) = auth_state.auth_failure_limiter {
                    if limiter.record_failure(&client_ip).await {
                        return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                            .into_response();
                    }
                }
                return HttpAppError(AppError::Unauthorized(e.to_string())).into_response();
            }
        }
    }

    if let Some(ref limiter) = auth_state.auth_failure_limiter {
        if limiter.record_failure(&client_ip).await {
            return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                .into_response();
        }
    }
    HttpAppError(AppError::Unauthorized("Invalid access key".to_string())).into_response()
}

async fn authenticate_access_key(
    token: &str,
    user_repository: &UserRepository,
) -> Result<UserContext, AppError> {
    let prefix = extract_key_prefix(token);
    let candidates = user_repository.list_by_key_prefix(&prefix).await?;

    for user in candidates {
        if verify_access_key(token, &user.key_hash)? {
            return Ok(UserContext {
                user_id: user.id,
                name: user.name,
            });
        }
    }

    Err(AppError::Unauthorized("Invalid access key".to_string()))
}

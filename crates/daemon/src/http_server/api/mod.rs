use axum::routing::{get, post};
use axum::Router;
use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

pub mod analyze;
pub mod client;
pub mod login;
pub mod notes;
pub mod verify;

pub use analyze::{AnalyzeRequest, AnalyzeResponse};
pub use login::{LoginRequest, LoginResponse};
pub use notes::{GetNotesRequest, PutNotesRequest, PutNotesResponse};
pub use verify::{VerifyRequest, VerifyResponse};

use crate::ServiceState;

/// Note API routes, reachable from any origin.
pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .route("/login", post(login::handler))
        .route("/verify", get(verify::handler))
        .merge(notes::router(state.clone()))
        .route("/analyze", post(analyze::handler))
        .with_state(state)
        .layer(cors_layer)
}

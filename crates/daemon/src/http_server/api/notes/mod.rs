use axum::routing::get;
use axum::Router;

pub mod get;
pub mod put;

pub use get::{GetNotesError, GetNotesRequest};
pub use put::{PutNotesError, PutNotesRequest, PutNotesResponse};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/notes", get(get::handler).post(put::handler))
        .with_state(state)
}

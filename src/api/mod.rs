//! HTTP API module for the DROS scoring engine.
//!
//! This module provides the REST endpoints for scoring one employee,
//! ranking a roster and exporting the ranked table as CSV.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{EXPORT_FILE_NAME, create_router};
pub use request::{LeaderboardRequest, ScoreRequest};
pub use response::{ApiError, ApiErrorResponse, LeaderboardResponse};
pub use state::AppState;

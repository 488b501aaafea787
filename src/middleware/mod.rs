pub mod auth;
pub mod response;
pub mod roles;

pub use auth::jwt_auth_middleware;
pub use response::{ApiResponse, ApiResult};
pub use roles::{ensure_admin, require_member};

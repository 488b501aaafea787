pub mod auth;
pub mod trash;
pub mod uploads;

pub use auth::AuthService;
pub use trash::TrashService;
pub use uploads::UploadService;

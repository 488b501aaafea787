pub mod alumni;
pub mod employment;
pub mod upload;
pub mod user;

pub use alumni::Alumni;
pub use employment::EmploymentRecord;
pub use upload::StoredFile;
pub use user::User;

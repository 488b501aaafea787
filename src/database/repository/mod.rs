pub mod alumni;
pub mod employment;
pub mod uploads;
pub mod users;

pub use alumni::{AlumniRepository, OwnerDirectory};
pub use employment::{EmploymentRepository, EmploymentStore};
pub use uploads::UploadRepository;
pub use users::{PageMeta, UserPage, UserRepository};

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::repository::{
    AlumniRepository, EmploymentRepository, UploadRepository, UserRepository,
};
use crate::services::{AuthService, TrashService, UploadService};

/// Shared application state. Built once in `main` from the connection pool
/// and configuration; everything downstream receives its dependencies from
/// here instead of reaching for globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub users: UserRepository,
    pub alumni: AlumniRepository,
    pub employment: EmploymentRepository,
    pub auth: Arc<AuthService>,
    pub trash: Arc<TrashService>,
    pub uploads: Arc<UploadService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let users = UserRepository::new(pool.clone());
        let alumni = AlumniRepository::new(pool.clone());
        let employment = EmploymentRepository::new(pool.clone());

        let auth = Arc::new(AuthService::new(users.clone(), Arc::new(alumni.clone())));
        let trash = Arc::new(TrashService::new(
            Arc::new(employment.clone()),
            Arc::new(alumni.clone()),
        ));
        let uploads = Arc::new(UploadService::new(
            UploadRepository::new(pool.clone()),
            config.uploads.directory.clone(),
            config.uploads.max_file_size_bytes,
        ));

        Self {
            pool,
            users,
            alumni,
            employment,
            auth,
            trash,
            uploads,
        }
    }
}

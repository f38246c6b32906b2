use crate::error::{AppError, USER_NOT_FOUND};
use crate::models::User;
use crate::sql::{select_user, select_users};
use crate::store::Executor;

pub struct UserService;

impl UserService {
    pub async fn list(db: &dyn Executor) -> Result<Vec<User>, AppError> {
        db.execute(&select_users()).await?.into_all()
    }

    pub async fn get(db: &dyn Executor, username: &str) -> Result<User, AppError> {
        db.execute(&select_user(username))
            .await?
            .into_first()?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }
}

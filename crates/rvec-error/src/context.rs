use core::error;

use super::any::AnyError;

/// Attaches a description to the error of a `Result`.
pub trait Context<T, E: error::Error + Send + Sync + 'static> {

    fn ctx_err(self, ctx: impl AsRef<str>) -> Result<T, AnyError>;

    fn ctx_err_with<C: AsRef<str>>(self, f: impl FnOnce() -> C) -> Result<T, AnyError>;
}

impl<T, E: error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {

    #[track_caller]
    fn ctx_err(self, ctx: impl AsRef<str>) -> Result<T, AnyError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(AnyError::new(ctx, err)),
        }
    }

    #[track_caller]
    fn ctx_err_with<C: AsRef<str>>(self, f: impl FnOnce() -> C) -> Result<T, AnyError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(AnyError::new(f(), err)),
        }
    }
}

pub mod auth;
pub mod projects;
pub mod segments;

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Map an unexpected store failure to the operation's client-facing 500,
/// logging the real cause. Absence never arrives here - repositories report
/// it as `None`/empty and handlers translate that into 404.
pub(crate) fn db_error(message: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| {
        tracing::error!("{}: {}", message, err);
        ApiError::internal_server_error(message)
    }
}

use mongodb::Database;

/// Shared per-process state handed to handlers and middleware.
///
/// One store client is built at startup and injected everywhere through the
/// router; nothing reaches for a global connection handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

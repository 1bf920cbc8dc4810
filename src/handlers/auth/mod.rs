mod login;
mod register;
mod session;

pub use login::login;
pub use register::register;
pub use session::{logout, refresh, verify};

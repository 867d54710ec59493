pub mod journal;
pub mod list;
pub mod session;
pub mod ticker;
pub mod watch;

pub use session::{SessionController, open_store};

pub mod clock;
pub mod path;
pub mod time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use time::format_elapsed;

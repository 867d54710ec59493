pub mod event;
pub mod label;
pub mod state;

pub use event::{END_SET, Event, EventKind};
pub use label::ObservationLabel;
pub use state::{SessionState, StopPolicy, Transition};

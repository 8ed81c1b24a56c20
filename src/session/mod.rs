pub mod controller;
pub mod grid;
pub mod input;
pub mod record;
pub mod state;
pub mod timer;

pub use controller::Controller;
pub use grid::Cell;
pub use record::{AttemptRecord, Summary};
pub use state::{Mode, Phase, Session, Step};
pub use timer::SecondTimer;

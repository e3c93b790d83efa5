pub mod pending_calls;
pub mod services;
pub mod value_objects;

pub use elevator_errors::{ElevatorError, ElevatorResult};
pub use pending_calls::*;
pub use services::*;
pub use value_objects::*;

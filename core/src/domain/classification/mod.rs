pub mod entities;
pub mod flight;
pub mod helpers;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

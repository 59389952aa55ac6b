//! Tasks that make up the firmware as well as the resources they use.
pub mod clock;
pub mod display;
#[macro_use]
pub mod resources;

mod action;
mod event;
mod generator;
mod request;
mod store;
mod test_case;

pub use action::*;
pub use event::*;
pub use generator::*;
pub use request::*;
pub use store::*;
pub use test_case::*;

mod event;
mod form;
mod status;
mod token;

pub mod dtos {
    pub use crate::event::dtos::*;
}

pub use crate::event::api::*;
pub use crate::form::api::*;
pub use crate::status::api::*;
pub use crate::token::api::*;

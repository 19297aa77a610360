mod action;
mod event;
mod gateway;
mod loading;
mod message;
mod role;
mod screen;
mod slash_commands;
mod stepper;
mod textarea;
mod workflow;

pub use action::*;
pub use event::*;
pub use gateway::*;
pub use loading::*;
pub use message::*;
pub use role::*;
pub use screen::*;
pub use slash_commands::*;
pub use stepper::*;
pub use textarea::*;
pub use workflow::*;

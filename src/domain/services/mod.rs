pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod conversation;
pub mod events;
mod scroll;
mod typewriter;
mod workflow;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use scroll::*;
pub use typewriter::*;
pub use workflow::*;

//! Terminal output
//!
//! The terminal acts as a "dumb display": the controller task renders a
//! full screen after each event, and the observer turns cues into bells.

pub mod observer;
pub mod renderer;

pub use observer::TerminalObserver;
pub use renderer::Renderer;

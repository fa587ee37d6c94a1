//! Shared plumbing for the `dots` and `campuspaths` viewers.
//!
//! Renderers in both binaries are pure functions that build a [`scene::Scene`]
//! in canvas space; [`scene::paint`] maps that scene onto an egui painter.
//! Slow work (HTTP calls, image decoding) runs through [`pending::spawn`] and is
//! picked up exactly once by the UI loop.

pub mod alert;
pub mod assets;
pub mod completion;
pub mod logging;
pub mod pending;
pub mod scene;

pub use assets::{Backdrop, ImageSlot, SlotEvent};
pub use pending::Pending;
pub use scene::{DrawCmd, Scene};

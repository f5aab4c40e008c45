//! Resolution-independent menu model
//!
//! Pointer input goes in, `MenuAction`s come out. Drawing is left to the
//! caller.

pub mod menu;

pub use menu::{Element, ElementId, ElementKind, Menu, MenuAction};

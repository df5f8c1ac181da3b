//! Stacks dropped images into one strip and exports it as a single PNG or JPEG.
//!
//! [`stack::ImageStack`] holds the images of the current session, [`export::merge`]
//! pastes them onto a white canvas, and [`session::Session`] turns user intents into
//! both. The SDL2 window lives behind the `gui` feature.

pub mod error;
pub mod export;
pub mod layout;
pub mod menu;
pub mod session;
pub mod stack;
pub mod timer;
#[cfg(feature = "gui")]
pub mod window;

pub use error::{ Error, Result };
pub use export::{ merge, ExportFormat, MergeOutcome };
pub use layout::{ Direction, LayoutState, Placement };
pub use session::{ Intent, Session, Status };
pub use stack::{ ImageStack, SourceImage, SUPPORTED_IMAGE_TYPES };

//! Lay out product labels on printable PDF pages and draw picture-frame wall diagrams.
//!
//! The crate is split into a small PDF core ([Document], [Page], [Font], [layout]) and the
//! two things built on top of it:
//!
//! * [labels] reads a table of products with `"WIDTH*HEIGHT"` sizes, shelf-packs them onto
//!   pages and renders each one as a filled shape with auto-fitted text.
//! * [wall] resolves a plan of picture frames on a wall and renders it as an annotated
//!   diagram with guide lines and distance measurements.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (mostly text) on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

pub mod labels;

pub mod wall;

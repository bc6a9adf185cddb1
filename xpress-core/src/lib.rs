//! # xpress Core
//!
//! Core components shared by the xpress decoders.
//!
//! - [`cursor`]: Bounds-checked little-endian reads over the input
//! - [`window`]: Output buffer that also serves as the LZ77 history
//! - [`options`]: Decoder configuration (output ceiling, offset policy)
//! - [`traits`]: The [`Decompressor`] trait and [`DecodeState`]
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use xpress_core::{ByteCursor, OutputWindow};
//!
//! let data = [0x34, 0x12, b'A'];
//! let mut cursor = ByteCursor::new(&data);
//! assert_eq!(cursor.read_u16_le().unwrap(), 0x1234);
//!
//! let mut window = OutputWindow::new();
//! window.write_literal(cursor.read_u8().unwrap()).unwrap();
//! window.copy_match(1, 3).unwrap();
//! assert_eq!(window.output(), b"AAAA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod error;
pub mod options;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use cursor::ByteCursor;
pub use error::{Result, XpressError};
pub use options::{DecodeOptions, OffsetPolicy};
pub use traits::{DecodeState, Decompressor};
pub use window::OutputWindow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cursor::ByteCursor;
    pub use crate::error::{Result, XpressError};
    pub use crate::options::{DecodeOptions, OffsetPolicy};
    pub use crate::traits::{DecodeState, Decompressor};
    pub use crate::window::OutputWindow;
}

#![deny(missing_docs)]

//! # Trackpack
//!
//! Packs the cross-platform identifiers of a music track (Amazon Music,
//! Apple Music, Spotify, YouTube Music) plus an explicit-content flag into
//! the small binary payload printed as a QR symbol on a card, and unpacks
//! scanned payloads back into identifiers.
//!
//! ## Usage Example
//!
//! ```
//! use trackpack::payload::{Decodable, Encodable, TrackIds};
//!
//! let ids = TrackIds {
//!     explicit: true,
//!     amazon_album: "B000002UJE".into(),
//!     amazon_track: "B000002UJF".into(),
//!     apple_album: "1440857781".into(),
//!     apple_track: "1440857817".into(),
//!     spotify: "4cOdK2wGLETKBW3PvgPWqT".into(),
//!     youtube: "dQw4w9WgXcQ".into(),
//! };
//!
//! let payload = ids.encode().unwrap();
//! assert_eq!(TrackIds::decode(&payload).unwrap(), ids);
//! ```

pub mod alphabet;
pub mod bignum;
pub mod error;
pub mod fixed;
pub mod leb128;
pub mod links;
pub mod payload;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::Error;

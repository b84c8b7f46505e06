//! # trackpack-cli
//!
//! Command line front end for the track payload codec: packs identifiers
//! into hex payloads, unpacks scanned payloads and resolves them into
//! platform links.

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

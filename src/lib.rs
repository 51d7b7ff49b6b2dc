#![cfg_attr(not(feature = "std"), no_std)]

//! Two-player naval battle: an authoritative session engine plus the thin
//! request/reply layer that remote clients drive it through.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
mod common;
mod config;
mod registry;
mod ship;
mod turn;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod engine;
#[cfg(feature = "std")]
mod engine_api;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod sim;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use registry::*;
pub use ship::*;
pub use turn::*;

#[cfg(feature = "std")]
pub use engine::*;
#[cfg(feature = "std")]
pub use engine_api::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from};
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use skeleton::*;
#[cfg(feature = "std")]
pub use stub::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};

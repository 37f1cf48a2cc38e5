//! # Tycoon
//!
//! An authoritative WebSocket server for room-based, turn-based board
//! game sessions: rooms, turn order, dice, property purchases, rent,
//! and buildings — validated and serialized against one canonical state
//! per room, with every accepted mutation broadcast to the room in
//! commit order.
//!
//! Rendering, animation, and camera work live in clients that consume
//! the event stream; they hold no authoritative state.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tycoon::TycoonServerBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tycoon::TycoonError> {
//!     let server = TycoonServerBuilder::new()
//!         .bind("0.0.0.0:8080")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;

pub use error::TycoonError;
pub use server::{TycoonServer, TycoonServerBuilder};

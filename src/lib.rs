#![forbid(unsafe_code)]

//! Slot machine prototype rendered like a Game Boy screen.
//!
//! # Features
//!
//! - Fixed 160x144 frame composed on the CPU from embedded sprite sheets.
//! - Three rolling reels, a ten digit score display and button feedback.
//! - Four color palette applied by a shader when presenting the frame.
//! - Integer scaled window with letterboxing, independent update and render loop.
//!
//! # Controls
//!
//! | Button | Key |
//! | --- | --- |
//! | D-pad | Arrow keys |
//! | A | `Z` |
//! | B | `X` |
//! | Start | `A` |
//! | Select | `S` |
//!
//! # Usage
//!
//! ```no_run
//! use slot_jam::{assets::Assets, Game, GameConfig};
//!
//! # fn try_main() -> miette::Result<()> {
//! let game = Game::new(Assets::load_embedded()?);
//!
//! // Run the game until the window is closed
//! slot_jam::window::run(game, GameConfig::default().with_title("My Slots"))?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod compositor;
pub mod config;
pub mod game;
mod graphics;
pub mod input;
pub mod palette;
pub mod reels;
pub mod score;
pub mod surface;
pub mod window;

pub use config::GameConfig;
pub use game::Game;
pub use rgb::RGBA8;

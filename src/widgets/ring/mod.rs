//! Circular progress ring widget
//!
//! Background track + animated progress arc + optional centered label

mod animation;
mod geometry;
mod ring;

pub use geometry::RingGeometry;
pub use ring::CircularProgress;

// Domain types and value objects
pub mod candle;
pub mod direction;

// Re-export commonly used types
pub use candle::{Candle, CandleType};
pub use direction::Direction;

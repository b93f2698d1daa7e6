// Presentation layer - Render frames and the event-driven widget runtime
pub mod mapper;
pub mod runtime;
pub mod tiles;

// Domain layer - Payload model, display series and layout geometry
pub mod error;
pub mod input;
pub mod layout;
pub mod needle;
pub mod series;
pub mod theme;

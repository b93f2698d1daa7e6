// Infrastructure layer - Config, payload decoding and adapters for the ports
pub mod canvas_recorder;
pub mod config;
pub mod glyph_measurer;
pub mod payload;

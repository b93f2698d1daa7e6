// Application layer - Transform, fit and widget state services
pub mod clock;
pub mod grid_fit;
pub mod series_transformer;
pub mod tile_measurer;
pub mod widget_service;

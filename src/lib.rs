// Dashboard widgets - Value tiles and gauges laid out to fit their container
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

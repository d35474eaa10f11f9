// Market record domain
pub mod market;

// Port interfaces
pub mod ports;

// Screening domain
pub mod screen;

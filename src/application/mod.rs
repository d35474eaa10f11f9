// Scan orchestration around the engine
pub mod scan_service;

// Console and JSON reporting
pub mod reporting;

pub use reporting::ScanReporter;
pub use scan_service::ScanService;

pub mod alerts;
pub mod csv_source;
pub mod mock;

pub use alerts::LogAlertSink;
pub use csv_source::CsvRecordSource;
pub use mock::MockRecordSource;

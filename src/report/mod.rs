// Report pipeline: flatten API records, label columns, render spreadsheets and PDFs.

pub mod exporter;
pub mod format;
pub mod headers;
pub mod normalize;
pub mod pdf;
pub mod spreadsheet;
pub mod summary;

pub use exporter::ReportExporter;
pub use headers::readable_header;
pub use normalize::flatten_data;

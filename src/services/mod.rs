pub mod app_resolver;
pub mod csv_exporter;
pub mod review_fetcher;

pub use app_resolver::AppResolver;
pub use csv_exporter::CsvExporter;
pub use review_fetcher::{FetchOutcome, ReviewFetcher};

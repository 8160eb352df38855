pub mod csv_writer;
pub mod dashboard_renderer;
pub mod digest_writer;

pub use csv_writer::CsvWriter;
pub use dashboard_renderer::DashboardRenderer;
pub use digest_writer::{render_digest, write_digest};

pub mod builder;
pub mod fonts;
pub mod layout;

pub use builder::{build_report, load_logo, ChartPlacement, DocumentSummary, ReportTemplate};
pub use layout::{PageLayout, PageTemplate};

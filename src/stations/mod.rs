pub mod pipeline;
pub mod providers;
pub mod repository;
pub mod source;
pub mod types;

pub use pipeline::FetchPipeline;
pub use repository::StationRepository;
pub use source::{SourceError, StationSource};
pub use types::RawStation;

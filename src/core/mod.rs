pub mod compat;
pub mod config;
pub mod driver;
pub mod identifier;
pub mod normalize;
pub mod result;

pub use compat::{check_compatibility, Compatibility};
pub use config::{unwrap_prior_result, AnalyzerConfig};
pub use driver::{AnalyzerDriver, Collaborators};
pub use identifier::derive_identifier;
pub use result::{
    AnalyzerMeta, AnalyzerQueryResult, FileEntry, ProjectMeta, QueryOutput, SkipReason,
};

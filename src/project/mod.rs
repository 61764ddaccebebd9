pub mod gather;
pub mod meta;

pub use gather::{FileGatherer, GatherFilesConfig, ProjectFile, ProjectInputData, WalkdirGatherer};
pub use meta::{ManifestMetaProvider, ProjectMetaProvider};

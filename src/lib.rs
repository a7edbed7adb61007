pub mod sections;
pub mod strip;
pub mod manifest;
pub mod transform;
pub mod cli;

pub use manifest::Manifest;
pub use sections::SectionAllowList;
pub use transform::{copy_package_json, ManifestTransformer, TransformRequest};

pub mod dataset_source;

pub use dataset_source::{DatasetPreview, DatasetSource};

pub mod transform_service;
pub mod analysis_service;
pub mod export_service;
pub mod pipeline_service;

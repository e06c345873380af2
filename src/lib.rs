pub mod logger;
pub mod ortho_pipeline;

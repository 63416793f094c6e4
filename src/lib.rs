pub mod logger;
pub mod sonar_pipeline;

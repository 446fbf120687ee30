use roadweight_core::model::{attribute::AttributeError, CustomModelError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failure reading configuration file '{path}': {message}")]
    Configuration { path: String, message: String },
    #[error("failure reading custom model file '{path}': {message}")]
    CustomModelFile { path: String, message: String },
    #[error("failure reading CSV file '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("invalid edge in '{path}' at row {row}: {message}")]
    InvalidEdge {
        path: String,
        row: usize,
        message: String,
    },
    #[error("invalid attribute declaration: {0}")]
    Attribute(#[from] AttributeError),
    #[error("invalid custom model: {0}")]
    CustomModel(#[from] CustomModelError),
    #[error("failure writing output: {0}")]
    Output(String),
}

//! Openapi command handler

use std::path::PathBuf;

use crate::api;
use crate::error::{AppError, AppResult};

pub struct OpenApiCommandHandler {
    output: Option<PathBuf>,
}

impl OpenApiCommandHandler {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    /// Writes the document to the output file, or to stdout without one.
    pub fn execute(&self) -> AppResult<()> {
        let json = Self::render()?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, json).map_err(|e| AppError::Internal {
                    source: anyhow::anyhow!("Failed to write {}: {}", path.display(), e),
                })?;
                println!("OpenAPI document written to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }

    pub fn render() -> AppResult<String> {
        api::openapi()
            .to_pretty_json()
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e),
            })
    }
}

//! Step outputs and failure annotations

use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::ActionError;

const OUTPUT_DELIMITER: &str = "ghadelimiter_vercel_await";

/// Publish a step output. Appends to the `GITHUB_OUTPUT` file when the
/// runner provides one, otherwise falls back to the legacy stdout command.
pub async fn set_output(
    output_file: Option<&Path>,
    name: &str,
    value: &str,
) -> Result<(), ActionError> {
    match output_file {
        Some(path) => {
            debug!("Writing output '{}' to {}", name, path.display());
            let entry = format_output(name, value)?;
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?;
            file.write_all(entry.as_bytes()).await?;
            file.flush().await?;
        }
        None => {
            println!("::set-output name={}::{}", name, escape_data(value));
        }
    }
    Ok(())
}

/// Mark the step as failed with `message`
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Render one entry of the output file
pub fn format_output(name: &str, value: &str) -> Result<String, ActionError> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{}={}\n", name, value));
    }
    if value.contains(OUTPUT_DELIMITER) {
        return Err(ActionError::ConfigError(format!(
            "Output '{}' contains the output delimiter",
            name
        )));
    }
    Ok(format!(
        "{}<<{}\n{}\n{}\n",
        name, OUTPUT_DELIMITER, value, OUTPUT_DELIMITER
    ))
}

/// Escape a workflow command payload
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

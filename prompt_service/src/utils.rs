use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::StartupError;

pub fn load_instruction(path: &Path) -> Result<String, StartupError> {
    fs::read_to_string(path).map_err(|source| StartupError::Instruction {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_text(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    tracing::info!(path = %path.display(), "saved output");
    Ok(())
}

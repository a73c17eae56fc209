//! Design loading, saving and validation.

use std::path::Path;

use crate::design::NozzleDesign;
use crate::error::{AppError, AppResult};

/// Load a design from a YAML file.
pub fn load_design(path: &Path) -> AppResult<NozzleDesign> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::DesignFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let design: NozzleDesign = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Design(format!("Failed to parse design YAML: {}", e)))?;

    Ok(design)
}

/// Save a design to a YAML file.
pub fn save_design(path: &Path, design: &NozzleDesign) -> AppResult<()> {
    let content = serde_yaml::to_string(design)
        .map_err(|e| AppError::Design(format!("Failed to serialize design: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::DesignFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Check every input of a design without solving anything.
pub fn validate_design(design: &NozzleDesign) -> AppResult<()> {
    if design.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Design must have a non-empty name".to_string(),
        ));
    }

    design.parameters().map_err(|e| match e {
        AppError::Flow(inner) => AppError::Validation(inner.to_string()),
        other => other,
    })?;

    design
        .gas
        .validate()
        .map_err(|e| AppError::Validation(format!("Gas properties: {}", e)))?;

    let r_t = design.geometry.throat_radius_m;
    if !(r_t.is_finite() && r_t > 0.0) {
        return Err(AppError::Validation(format!(
            "Throat radius must be positive, got {} m",
            r_t
        )));
    }
    if design.geometry.samples < 2 {
        return Err(AppError::Validation(format!(
            "Contour needs at least 2 samples, got {}",
            design.geometry.samples
        )));
    }

    Ok(())
}

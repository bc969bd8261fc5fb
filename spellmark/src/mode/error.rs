use smol_str::SmolStr;

/// Errors from registering modes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ModeError {
    /// The base mode a composed mode should be layered over is not registered
    #[error("Cannot compose '{name}': base mode '{base}' is not available")]
    ComposedModeUnavailable { name: SmolStr, base: SmolStr },
}

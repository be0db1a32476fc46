//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no tile function set and tile cache disabled: nothing to render")]
    MissingTileSource,
}

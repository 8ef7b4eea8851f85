pub mod pool;
pub mod prefabs;
pub mod track;

use crate::assets::AssetError;
use crate::fsm::FsmError;

/// Failure while building the scene. Always a setup bug, never recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("steering graph: {0}")]
    Fsm(#[from] FsmError),
}

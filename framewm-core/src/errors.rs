use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Transient chain for window does not terminate")]
    TransientLoop,
    #[error("No such window")]
    WindowNotFound,
    #[error("No screen configured")]
    NoScreens,
}

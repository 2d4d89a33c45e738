//! Presentation-adapter failures. These only happen at startup (window
//! and renderer creation); once the main loop is running, SDL has nothing
//! left to fail that this crate treats as anything but a bug.

#[derive(Debug)]
pub enum AdapterError {
    Init(String),
    Video(String),
    Window(String),
    Canvas(String),
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(e) => write!(f, "failed to initialize SDL2: {e}"),
            Self::Video(e) => write!(f, "failed to initialize SDL2 video subsystem: {e}"),
            Self::Window(e) => write!(f, "failed to create window: {e}"),
            Self::Canvas(e) => write!(f, "failed to create canvas: {e}"),
        }
    }
}

impl std::error::Error for AdapterError {}

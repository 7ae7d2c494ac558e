pub mod audio;
pub mod video;

pub use audio::{AudioFormat, AudioRequest, ErrorResponse};
pub use video::VideoResult;

pub mod audio;
pub mod classifier;
pub use audio::AudioController;
pub use classifier::is_video_url;

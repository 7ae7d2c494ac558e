pub mod audio;
pub use audio::audio_route;

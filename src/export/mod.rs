pub mod ffmpeg;
pub mod gif;
pub mod pipeline;
pub mod sink;

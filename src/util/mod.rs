pub mod audio;
pub mod log;

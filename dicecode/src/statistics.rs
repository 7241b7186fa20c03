pub mod roller;
pub mod sampling;

pub mod access;
pub mod delay;

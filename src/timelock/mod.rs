pub mod controller;
pub mod dispatch;
pub mod events;
pub mod operations;
pub mod snapshot;

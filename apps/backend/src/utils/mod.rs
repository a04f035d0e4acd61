pub mod serde_time;

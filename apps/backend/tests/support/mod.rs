pub mod app_builder;
pub mod factory;
pub mod test_state;

pub use app_builder::create_test_app;

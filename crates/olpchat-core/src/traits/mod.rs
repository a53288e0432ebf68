pub mod provider;

pub use provider::Provider;

pub mod credentials;
pub mod sheets;
pub mod submission;

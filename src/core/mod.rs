pub mod config;
pub mod credentials;
pub mod dataset;
pub mod download;
pub mod kaggle;
pub mod preview;

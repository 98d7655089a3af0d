pub mod checker;
pub mod config;
pub mod github;
pub mod issues;
pub mod model;
pub mod output;
pub mod runner;
pub mod table;

pub use config::Config;
pub use github::{GithubClient, HostApi};
pub use model::{CheckReport, Plugin};
pub use runner::CheckRunner;

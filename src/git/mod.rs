pub mod cli;


pub use cli::{GitCli, GitCliImpl};

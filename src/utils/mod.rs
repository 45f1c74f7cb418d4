pub mod env;
pub mod paths;
pub mod shell;

mod app;
mod cli;
mod config;
mod error;
mod repos;
mod utils;

fn main() {
    cli::run();
}

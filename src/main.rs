mod app;
mod catalog;
mod config;
mod error;
mod journal;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

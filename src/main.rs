mod app;
mod audio;
mod catalog;
mod config;
mod logging;
mod runtime;
mod time;
mod ui;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

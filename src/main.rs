use std::env;
use std::fs;

use log::LevelFilter;

fn main() {
    setup_logging().expect("Logger setup failed");
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).expect("Pass .nes file path to run");
    let rom_bytes = fs::read(path).expect("Failed to read ROM file");
    nes_core::screen::run(&rom_bytes);
}

fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        // Format each log message
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        // Filter logs based on level
        .level(LevelFilter::Debug)
        // Output to a file
        .chain(fern::log_file("output.log")?)
        // Apply settings
        .apply()?;
    Ok(())
}

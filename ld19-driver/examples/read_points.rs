use clap::Parser;
use ld19_driver::{run_driver, DriverConfig};
use std::time::Duration;

/// Reads data from an LD19 LiDAR and reports the point buffer.
#[derive(Parser)]
#[command(disable_version_flag = true)]
struct Args {
    /// The device path to a serial port
    port: String,
    /// Number of points to keep
    #[arg(long, default_value_t = 5000)]
    capacity: usize,
    /// Interval between reports in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,
    /// Print every snapshot as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = DriverConfig::default().with_capacity(args.capacity);

    let (driver_thread, buffer) = match run_driver(&args.port, config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    while !driver_thread.is_finished() {
        std::thread::sleep(Duration::from_millis(args.interval_ms));
        let points = buffer.snapshot();
        if args.json {
            match serde_json::to_string(&points) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{e}"),
            }
        } else {
            let stats = driver_thread.stats();
            println!(
                "{} points, {} frames, {} checksum errors",
                points.len(),
                stats.frames,
                stats.checksum_errors
            );
        }
    }

    if let Err(e) = driver_thread.stop() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

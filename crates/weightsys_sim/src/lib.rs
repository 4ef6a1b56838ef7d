use std::{
    io::{self, stdout, Write},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{info, Level};
use weightsys_flow::StartFlow;

mod demo;
pub use demo::*;

mod report;
pub use report::*;

mod simulation;
pub use simulation::*;

pub fn sim_main(flow: StartFlow) -> io::Result<()> {
    setup_tracing();

    let mut out = stdout().lock();
    match flow {
        StartFlow::Demo => {
            info!(target: "sim", "running demo");
            run_demo(&mut out)?;
        }
        StartFlow::Simulate { settings } => {
            info!(target: "sim", "simulating {} arms for {} rounds", settings.arms.len(), settings.rounds);
            let mut simulation = Simulation::new(&settings);
            let report = simulation.run(&mut out)?;
            writeln!(out, "{}", report)?;
        }
    }
    out.flush()
}

/// `<data dir>/weightsys/traces/`, created if missing.
fn traces_dir() -> Option<PathBuf> {
    let path = dirs::data_dir()?.join("weightsys").join("traces");
    std::fs::create_dir_all(&path).ok()?;
    Some(path)
}

fn trace_file(dir: PathBuf, time: SystemTime) -> PathBuf {
    let epoch = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    dir.join(format!("trace_{}.txt", epoch))
}

/// Sends every trace to a fresh file, without a data dir tracing stays off.
fn setup_tracing() {
    let Some(dir) = traces_dir() else {
        return;
    };
    let path = trace_file(dir, SystemTime::now());

    let Ok(log_file) = std::fs::File::create(&path) else {
        eprintln!("Can't create trace file at {:?}", path);
        return;
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(log_file)
        .with_max_level(Level::TRACE)
        .with_line_number(true)
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"));
}

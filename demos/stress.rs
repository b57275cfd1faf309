//! Insert random values into an [`AvlTree`], optionally writing a JSON log of
//! every insert, rebalance and rotation step.
//!
//! ```text
//! cargo run --example stress --features serde -- [N_VALUES] [LOG_PATH] [N_LOGGED]
//! ```
//!
//! `N_VALUES` defaults to 10,000. When `LOG_PATH` is given (for example
//! `tree_log.json`), the steps of the first `N_LOGGED` inserts (default 20)
//! are recorded with a snapshot of the tree shape at each step.

use std::{cell::Cell, env, error::Error, fs::File, io::BufWriter};

use avltree::{AvlTree, Observer, Step, StepLog, TreeView};
use log::{info, LevelFilter};
use rand::Rng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const VALUE_MAX: u64 = 1_000_000_000_000;

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut args = env::args().skip(1);
    let n_values: usize = args.next().map(|v| v.parse()).transpose()?.unwrap_or(10_000);
    let log_path = args.next();
    let n_logged: usize = args.next().map(|v| v.parse()).transpose()?.unwrap_or(20);

    let n_logged = match log_path {
        Some(_) => n_logged.min(n_values),
        None => 0,
    };

    let mut rng = rand::thread_rng();

    // Record the steps of the first inserts only, as every step copies the
    // whole tree.
    let recording = Cell::new(n_logged > 0);
    let mut steps = StepLog::new();

    let mut t = AvlTree::with_observer(|step: Step<'_, u64>, tree: TreeView<'_, u64>| {
        if recording.get() {
            steps.on_step(step, tree);
        }
    });

    for i in 0..n_values {
        if i == n_logged {
            recording.set(false);
        }
        t.insert(rng.gen_range(0..VALUE_MAX));
    }

    let (len, height) = (t.len(), t.height());
    drop(t);

    info!("inserted {n_values} values ({len} unique), height {height}");

    if let Some(path) = log_path {
        let file = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(file, &steps)?;
        info!("wrote {} steps to {path}", steps.len());
    }

    Ok(())
}

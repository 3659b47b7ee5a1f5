//! Receive-side throughput sweeps.
//!
//! For every sender-thread count we spawn that many producers, gate them
//! on a shared start flag, and measure how fast the single receiver can
//! drain the channel.  The senders loop until the channel disconnects,
//! which happens when the measuring side drops the receiver, so every run
//! ends with all senders joined and no channel left behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bench::{BenchStats, Bencher};
use crossbeam::channel as alt;
use log::info;

use crate::series::Series;

/// Controls a sweep: which thread counts are visited and how long each
/// point is measured.
#[derive(Debug, Clone)]
pub struct SweepOpts {
    pub max_threads: u32,
    pub runs: u32,
    pub warmup: Duration,
    pub window: Duration,
}

impl Default for SweepOpts {
    fn default() -> Self {
        SweepOpts {
            max_threads: 4,
            runs: 5,
            warmup: Duration::from_secs(1),
            window: Duration::from_secs(7),
        }
    }
}

macro_rules! sweep {
    ($name:ident, $label:expr, $make:expr) => {
        pub fn $name(opts: &SweepOpts) -> Series {
            let mut series = Series::new($label);
            for threads in 1..=opts.max_threads {
                let mut samples = Vec::with_capacity(opts.runs as usize);
                for _ in 0..opts.runs {
                    let (tx, rx) = $make;
                    let go = Arc::new(AtomicBool::new(false));
                    let mut senders = Vec::with_capacity(threads as usize);
                    for _ in 0..threads {
                        let tx = tx.clone();
                        let go = go.clone();
                        senders.push(thread::spawn(move || {
                            while !go.load(Ordering::Relaxed) {}
                            while let Ok(()) = tx.send(()) {}
                        }));
                    }
                    drop(tx);
                    go.store(true, Ordering::SeqCst);

                    let mut b = Bencher::new();
                    b.warmup(opts.warmup).window(opts.window);
                    let throughput = b.throughput(|n| {
                        for _ in 0..n {
                            rx.recv().unwrap();
                        }
                    });

                    // Disconnect the senders, then wait for all of them.
                    drop(rx);
                    for sender in senders {
                        sender.join().unwrap();
                    }

                    samples.push(throughput);
                }

                let stats = BenchStats::new(stringify!($name).to_string(), threads, samples);
                info!("{}", stats);
                for &sample in stats.samples() {
                    series.push(threads, sample);
                }
            }
            series
        }
    };
}

sweep!(alt_unbounded, "alt", alt::unbounded::<()>());
sweep!(alt_rendezvous, "alt", alt::bounded::<()>(0));
sweep!(std_unbounded, "std", mpsc::channel::<()>());
sweep!(std_rendezvous, "std", mpsc::sync_channel::<()>(0));

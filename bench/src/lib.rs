//! A throughput measurement helper.
//!
//! We use this instead of `criterion` or `bencher` in order to make it
//! behave exactly as we want it to: the number we are after is how many
//! messages the receiving end of a channel drains per millisecond over a
//! fixed wall-clock window, not the latency of a single operation.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

pub use std::hint::black_box;

/// Receive-side throughput measurement.
///
/// A measurement has two phases: a calibration pass that counts how many
/// messages arrive within `warmup`, and the measured window.  The
/// calibrated count decides how many messages are drained between clock
/// reads in the window, so that the hot loop is not dominated by
/// `Instant::now`.
pub struct Bencher {
    warmup: Duration,
    window: Duration,
    batch: u64,
}

impl Bencher {
    pub fn new() -> Self {
        Bencher {
            warmup: Duration::from_secs(1),
            window: Duration::from_secs(7),
            batch: 1000,
        }
    }

    pub fn warmup(&mut self, d: Duration) -> &mut Self {
        self.warmup = d;
        self
    }

    pub fn window(&mut self, d: Duration) -> &mut Self {
        self.window = d;
        self
    }

    /// Calibration batch size.  Must be non-zero.
    pub fn batch(&mut self, n: u64) -> &mut Self {
        assert!(n > 0);
        self.batch = n;
        self
    }

    /// Run one measurement.  `recv` must block until it has received the
    /// given number of messages.  Returns messages per millisecond.
    pub fn throughput<F: FnMut(u64)>(&self, mut recv: F) -> f64 {
        // Determine approximately how many messages arrive during the
        // warmup, to use as the amount we receive before checking the time.
        let start = Instant::now();
        let mut received: u64 = 0;
        let at_once = loop {
            recv(self.batch);
            received += self.batch;
            if start.elapsed() >= self.warmup {
                break received;
            }
        };

        let start = Instant::now();
        let mut received: u64 = 0;
        let elapsed = loop {
            recv(at_once);
            received += at_once;
            let elapsed = start.elapsed();
            if elapsed >= self.window {
                break elapsed;
            }
        };
        debug!("{} messages in {:?}", received, elapsed);

        received as f64 / (elapsed.as_nanos() as f64 / 1_000_000.0)
    }
}

impl Default for Bencher {
    fn default() -> Self {
        Bencher::new()
    }
}

/// Every sample from the repeated runs at one sender-thread count.
#[derive(Debug, Clone)]
pub struct BenchStats {
    name: String,
    threads: u32,
    samples: Vec<f64>,
}

impl BenchStats {
    pub fn new(name: String, threads: u32, samples: Vec<f64>) -> Self {
        BenchStats {
            name,
            threads,
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn avg(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn var(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let avg = self.avg();
        self.samples.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / self.samples.len() as f64
    }
}

impl fmt::Display for BenchStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{:2}: {} msg/ms (+/- {})",
            self.name,
            self.threads,
            fmt_thousands_sep(self.avg() as u64),
            fmt_thousands_sep(self.var() as u64)
        )
    }
}

fn fmt_thousands_sep(mut n: u64) -> String {
    let sep = ',';
    use std::fmt::Write;
    let mut output = String::new();
    let mut trailing = false;
    for &pow in &[9, 6, 3, 0] {
        let base = 10u64.pow(pow);
        if pow == 0 || trailing || n / base != 0 {
            if !trailing {
                output.write_fmt(format_args!("{}", n / base)).unwrap();
            } else {
                output.write_fmt(format_args!("{:03}", n / base)).unwrap();
            }
            if pow != 0 {
                output.push(sep);
            }
            trailing = true;
        }
        n %= base;
    }

    output
}

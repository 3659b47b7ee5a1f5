#[macro_use]
extern crate clap;

use std::fs;
use std::path::Path;

use anyhow::bail;
use log::info;

use chanbench::throughput::{self, SweepOpts};
use chanbench::Series;

/// We need this, as somehow `(fn, String)` is not okay, while `(F(fn), String)` is.
pub struct F(pub fn(&SweepOpts) -> Series);

impl F {
    pub fn call(&self, opts: &SweepOpts) -> Series {
        (self.0)(opts)
    }
}

macro_rules! S {
  ($($f:expr),*) => {
    vec![$(
        (F($f), stringify!($f).to_string()),
      )*
    ]
  }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let benches = S!(
        throughput::alt_unbounded,
        throughput::alt_rendezvous,
        throughput::std_unbounded,
        throughput::std_rendezvous
    );

    let matches = clap_app!(benchmark_runner =>
        (version: "0.1")
        (@arg max_threads: -t +takes_value "Sets the maximum number of sender threads in the sweep")
        (@arg runs: -r +takes_value "Sets the number of runs per thread count")
        (@arg output_dir: -d +takes_value "Sets the output directory for the series CSV files")
        (@arg name: +takes_value "Runs only the benchmarks whose name contains this string")
    ).get_matches();

    let mut opts = SweepOpts::default();
    if let Ok(t) = value_t!(matches, "max_threads", u32) {
        opts.max_threads = t;
    }
    if let Ok(r) = value_t!(matches, "runs", u32) {
        opts.runs = r;
    }
    let filter_name = value_t!(matches, "name", String).unwrap_or_else(|_| "".to_string());
    let output_dir = value_t!(matches, "output_dir", String).unwrap_or_else(|_| ".".to_string());

    let selected: Vec<&(F, String)> = benches
        .iter()
        .filter(|&&(_, ref name)| name.contains(&filter_name))
        .collect();
    if selected.is_empty() {
        bail!("no benchmarks match the pattern '{}'", filter_name);
    }

    fs::create_dir_all(&output_dir)?;
    for &(ref f, ref name) in &selected {
        info!("running {}", name);
        let series = f.call(&opts);

        // `throughput::alt_unbounded` writes to `alt_unbounded.csv`.
        let stem = name.rsplit("::").next().unwrap_or_else(|| name.as_str());
        let path = Path::new(&output_dir).join(format!("{}.csv", stem));
        series.write_csv(&path)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

#[macro_use]
extern crate clap;

use std::fs;

use chanbench::chart;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = clap_app!(render_charts =>
        (version: "0.1")
        (@arg data_dir: -d +takes_value "Sets the directory holding the series CSV files")
        (@arg output_dir: -o +takes_value "Sets the output directory for the SVG charts")
    ).get_matches();

    let data_dir = value_t!(matches, "data_dir", String).unwrap_or_else(|_| ".".to_string());
    let output_dir = value_t!(matches, "output_dir", String).unwrap_or_else(|_| ".".to_string());
    fs::create_dir_all(&output_dir)?;

    for spec in chart::default_charts(&data_dir, &output_dir) {
        spec.render()?;
    }

    Ok(())
}

use clap::Parser;
use dotscreen::{init_logging, run, Args, BUILD_DATE, VERSION};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;
    debug!("dotscreen {} built {}", VERSION, BUILD_DATE);
    run(&args)?;

    Ok(())
}

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Leafscan disease guidance service")]
struct Args {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "127.0.0.1:4100")]
    bind: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let addr: SocketAddr = args
        .bind
        .parse()
        .with_context(|| format!("parsing bind address {}", args.bind))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(api::server::serve(addr));
    Ok(())
}

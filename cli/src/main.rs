mod commands;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use commands::CommandLine;
use sweepr_common::error::SetupError;
use sweepr_common::network::target::Domain;
use sweepr_core::invoke::ProcessInvoker;
use sweepr_core::pipeline;
use sweepr_core::store::ReconStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = CommandLine::parse_args();
    terminal::logging::init();

    // Fatal preconditions; the pipeline never starts past a failure here.
    let domain: Domain = cmd.target.parse()?;
    if cmd.port_scan && !is_root::is_root() {
        return Err(SetupError::MissingPrivilege("port scanning requires root").into());
    }

    let cfg = cmd.to_config()?;
    let out_dir = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("sweepr-{domain}")));
    let store = ReconStore::create(out_dir)?;

    let spinner = terminal::spinner::start(&format!("sweeping {domain}..."));
    let outcome = pipeline::run(&domain, &cfg, Arc::new(ProcessInvoker), &store).await;
    spinner.finish_and_clear();

    let (_result, summary) = outcome?;
    terminal::print::summary(&domain, &summary, store.root());
    Ok(())
}

mod console_view;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use meshroom::model::DeviceInfo;
use meshroom::session::{MediaDevices, VirtualDevices};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cargo-meshroom")]
#[command(bin_name = "cargo-meshroom")]
enum Cli {
    Meshroom(MeshroomArgs),
}

#[derive(clap::Args)]
struct MeshroomArgs {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the virtual capture devices.
    Devices,

    /// Join an in-process room with a few bot peers.
    Demo(demo::DemoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli::Meshroom(args) = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    match args.command {
        Commands::Devices => list_devices().await?,
        Commands::Demo(demo_args) => demo::run(demo_args).await?,
    }

    Ok(())
}

async fn list_devices() -> Result<()> {
    let devices = VirtualDevices::default_rig().enumerate().await?;
    let (microphones, cameras) = DeviceInfo::split_by_kind(&devices);

    println!("{}", "🎙  Microphones".cyan().bold());
    print_devices(&microphones);
    println!("{}", "📷 Cameras".cyan().bold());
    print_devices(&cameras);
    Ok(())
}

fn print_devices(devices: &[DeviceInfo]) {
    if devices.is_empty() {
        println!("   {}", "(none)".dimmed());
    }
    for device in devices {
        println!("   {}  {}", device.device_id.yellow(), device.label);
    }
}

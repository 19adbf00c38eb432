use anyhow::Result;
use clap::{CommandFactory, Parser};

use sfrbox::{
    client::{self, BoxClient, LedState},
    config::{self, Config},
};

#[derive(Parser)]
#[command(name = "sfrbox")]
#[command(about = "Administer an SFR Box router through its web management interface")]
#[command(version)]
struct Cli {
    /// Show status info (firmware, WAN state, uptime)
    #[arg(short, long)]
    infos: bool,

    /// List devices connected to the box
    #[arg(short, long)]
    connected: bool,

    /// Turn the front-panel LEDs on or off
    #[arg(short, long, value_name = "STATE", value_parser = parse_led_state)]
    led: Option<LedState>,

    /// Reboot the box
    #[arg(short, long)]
    reboot: bool,

    /// Base URL of the box (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Shared secret key for login (overrides the config file)
    #[arg(short, long)]
    key: Option<String>,

    /// Save the effective URL and key to the config file
    #[arg(long)]
    save: bool,
}

fn parse_led_state(value: &str) -> Result<LedState, String> {
    match value {
        "on" => Ok(LedState::On),
        "off" => Ok(LedState::Off),
        _ => Err(format!("invalid LED state '{value}' (expected 'on' or 'off')")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // No flags at all: print usage and exit cleanly
    if !(cli.infos || cli.connected || cli.led.is_some() || cli.reboot || cli.save) {
        Cli::command().print_help()?;
        return Ok(());
    }

    let mut cfg = Config::load()?;
    if let Some(url) = cli.url {
        cfg.url = url;
    }
    if let Some(key) = cli.key {
        cfg.key = key;
    }

    if cli.save {
        cfg.save()?;
        let path = config_path_display()?;
        println!("Saved configuration to {path}");
    }

    let client = BoxClient::new(cfg.url.clone(), cfg.key.clone());

    // Flags are independent and combinable; they run in a fixed order,
    // reboot last since the box drops off the network afterwards.
    if cli.infos {
        cmd_infos(&client)?;
    }
    if cli.connected {
        cmd_connected(&client)?;
    }
    if let Some(state) = cli.led {
        cmd_led(&client, state)?;
    }
    if cli.reboot {
        cmd_reboot(&client)?;
    }

    Ok(())
}

fn cmd_infos(client: &BoxClient) -> Result<()> {
    let entries = client.infos()?;
    client::display_infos(&entries);
    Ok(())
}

fn cmd_connected(client: &BoxClient) -> Result<()> {
    let devices = client.connected_devices()?;
    client::display_devices(&devices);
    Ok(())
}

fn cmd_led(client: &BoxClient, state: LedState) -> Result<()> {
    client.set_leds(state)?;
    println!("Leds: {state}");
    Ok(())
}

fn cmd_reboot(client: &BoxClient) -> Result<()> {
    client.reboot()?;
    println!("Reboot in progress...");
    Ok(())
}

fn config_path_display() -> Result<String> {
    Ok(config::config_path()?.display().to_string())
}

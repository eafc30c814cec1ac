//! Interactive mode for the server.
//!
//! Prompts for bind address, port and simulated latency before starting.

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Prompts are pre-filled from `defaults` (usually
/// [`ServerConfig::from_env`]) and the result is passed straight to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(defaults: ServerConfig) -> std::io::Result<()> {
    println!("Site Analysis Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let simulated_latency = Confirm::new()
        .with_prompt("Simulate response latency?")
        .default(defaults.simulated_latency)
        .interact()
        .unwrap_or(defaults.simulated_latency);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        simulated_latency,
    })
    .await
}

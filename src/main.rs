use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use service_monitor::api::{get_metrics, health, list_services};
use service_monitor::cli::{Command, CommandArgs};
use service_monitor::config::MonitorConfig;
use service_monitor::output;
use service_monitor::services::{ServiceMonitor, TcpProbe};
use service_monitor::state::new_state;

#[actix_web::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CommandArgs::parse();
    let command = args.command();

    let default_filter = match command {
        Command::Serve { .. } => "info",
        Command::Check { .. } => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = args.monitor_config()?;
    let monitor = ServiceMonitor::new(
        &config.host,
        Arc::new(TcpProbe::new(config.timeout())),
        args.resolver.build(config.timeout()),
    );

    match command {
        Command::Check { json } => check(&config, &monitor, json).await,
        Command::Serve { address, port } => {
            serve(config, monitor, &address, port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn check(config: &MonitorConfig, monitor: &ServiceMonitor, json: bool) -> anyhow::Result<ExitCode> {
    if !json {
        println!("🔍 Checking service status...\n");
    }

    let report = monitor.run(&config.services).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render(&report));
    }

    Ok(if report.all_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn serve(config: MonitorConfig, monitor: ServiceMonitor, address: &str, port: u16) -> anyhow::Result<()> {
    let bind_address = format!("{}:{}", address, port);

    print_banner(&config, &bind_address);

    let state = new_state(config.services, monitor);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/api/services", web::get().to(list_services))
            .route("/metrics", web::get().to(get_metrics))
            .route("/health", web::get().to(health))
    })
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

fn print_banner(config: &MonitorConfig, bind_address: &str) {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      Service Monitor v{:<36}║", env!("CARGO_PKG_VERSION"));
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🚀 Server starting on http://{}", bind_address);
    println!();
    println!("📋 Available endpoints:");
    println!("  GET    /api/services   - Current status report (503 unless all running)");
    println!("  GET    /metrics        - Prometheus metrics");
    println!("  GET    /health         - Health check");
    println!();
    println!("👀 Watching {} services on {}:", config.services.len(), config.host);
    for service in &config.services {
        println!("  • {} ({}) - Port {}", service.name, service.protocol, service.port);
    }
    println!("═══════════════════════════════════════════════════════════");
}

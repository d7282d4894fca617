//! Dashboard entry point: CLI wiring and config-driven grid construction.

use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vpp_dashboard::advisory;
use vpp_dashboard::cli::Cli;
use vpp_dashboard::config::DashboardConfig;
use vpp_dashboard::io::export::export_history_csv;
use vpp_dashboard::runner::run_scripted;
use vpp_dashboard::sim::GridState;
use vpp_dashboard::sim::clock::{Clock, Paced};
use vpp_dashboard::sim::random::StdSource;

/// Installs the stderr subscriber.
///
/// The terminal dashboard owns the screen, so only errors are let through
/// while it runs.
fn init_tracing(interactive: bool) {
    let filter = if interactive {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> DashboardConfig {
    let mut cfg = match &cli.config {
        Some(path) => match DashboardConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => DashboardConfig::default(),
    };

    if let Some(seed) = cli.seed {
        cfg.simulation.seed = Some(seed);
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "tui")]
    let interactive = cli.tui;
    #[cfg(not(feature = "tui"))]
    let interactive = false;
    init_tracing(interactive);

    let cfg = load_config(&cli);
    let grid = GridState::new(cfg.fleet(), cfg.sim_config());
    let mut rng = StdSource::from_optional_seed(cfg.simulation.seed);
    let advisor = advisory::from_config(&cfg.advisory);

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use vpp_dashboard::api::{AppState, serve};

        let period = Duration::from_millis(cfg.simulation.tick_interval_ms);
        let state = Arc::new(AppState::new(grid, rng, advisor));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let result = tokio::runtime::Runtime::new()
            .and_then(|rt| rt.block_on(serve(state, addr, period)));
        if let Err(e) = result {
            error!(%e, "API server failed");
            process::exit(1);
        }
        return;
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        use vpp_dashboard::tui::{self, runtime::App};

        if let Err(e) = tui::run(App::new(grid, rng, advisor)) {
            error!(%e, "TUI failed");
            process::exit(1);
        }
        return;
    }

    let events: Vec<_> = cfg.events.iter().chain(&cli.events).copied().collect();
    info!(
        assets = grid.assets().len(),
        ticks = cli.ticks,
        events = events.len(),
        "starting headless run"
    );

    let print_tick = |state: &GridState| {
        if let Some(point) = state.history().latest() {
            println!("{point}");
        }
    };
    let mut clock = Clock::new(cli.ticks);
    let final_state = if cli.realtime {
        let interval = Duration::from_millis(cfg.simulation.tick_interval_ms);
        run_scripted(grid, &mut Paced::new(clock, interval), &mut rng, &events, print_tick)
    } else {
        run_scripted(grid, &mut clock, &mut rng, &events, print_tick)
    };

    println!("\n{}", final_state.stats());

    if let Some(path) = &cli.history_out {
        if let Err(e) = export_history_csv(final_state.history().iter(), path) {
            error!(%e, path = %path.display(), "failed to write CSV");
            process::exit(1);
        }
        info!(path = %path.display(), "history written");
    }

    #[cfg(feature = "advisory")]
    if cli.advise {
        let request = advisory::AdvisoryRequest::from_state(&final_state);
        let stats = final_state.stats();
        let at = final_state.elapsed_ms();
        let advice = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt.block_on(advisory::request_advice(
                advisor.as_ref(),
                request,
                stats,
                at,
            )),
            Err(e) => {
                error!(%e, "failed to start advisory runtime");
                process::exit(1);
            }
        };
        println!("\nAdvisory: {}", advice.text);
    }
    #[cfg(not(feature = "advisory"))]
    drop(advisor);
}

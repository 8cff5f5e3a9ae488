use std::io;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use crossterm::event;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use citadel::app::Workbench;
use citadel::core::{EventResult, View};
use citadel::graphql::GraphqlClient;
use citadel::logging;
use citadel::runtime::AsyncRuntime;
use citadel::services::{AppConfig, CatalogService};
use citadel::tui::TerminalGuard;

fn main() {
    let config = match AppConfig::from_env(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    let _logging = logging::init();

    if let Err(err) = run(config) {
        eprintln!("citadel: {}", err);
        std::process::exit(1);
    }
}

fn run(config: AppConfig) -> io::Result<()> {
    let client = GraphqlClient::builder(&config.endpoint)
        .request_timeout(config.request_timeout)
        .user_agent(concat!("citadel/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let catalog = CatalogService::new(client);
    let runtime = AsyncRuntime::new()?;

    let guard = TerminalGuard::new()?;

    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    citadel::tui::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut workbench = Workbench::new(&config, catalog, runtime);

    tracing::info!(endpoint = %config.endpoint, "starting");

    loop {
        match signal_rx.try_recv() {
            Ok(signal) => {
                tracing::info!(?signal, "terminating on signal");
                break;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
        }

        terminal.draw(|frame| workbench.render(frame, frame.area()))?;

        if event::poll(config.tick)? {
            let input = event::read()?.into();
            if let EventResult::Quit = workbench.handle_input(&input) {
                break;
            }
        }

        workbench.on_tick(Instant::now());
    }

    guard.restorer().restore()?;
    Ok(())
}

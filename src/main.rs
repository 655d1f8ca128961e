mod cli;
mod config;
mod db;
mod filter;
mod fixture;
mod loader;
mod logging;
mod models;
mod stats;
mod ui;

#[cfg(test)]
mod test_support;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::cli::Cli;
use crate::config::SourceSettings;
use crate::fixture::FixtureSource;
use crate::loader::{LoadOutcome, LoadTicket, ProjectSource};
use crate::ui::employee_projects::{
    EmployeeProjectsAction, EmployeeProjectsState, handle_input, render_employee_projects,
};

// Main application state
struct AppState {
    source: Arc<dyn ProjectSource>,
    projects_state: EmployeeProjectsState,
    outcomes_tx: UnboundedSender<LoadOutcome>,
    outcomes_rx: UnboundedReceiver<LoadOutcome>,
}

impl AppState {
    fn new(source: Arc<dyn ProjectSource>, projects_state: EmployeeProjectsState) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            source,
            projects_state,
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Fetch in the background; the outcome comes back through the channel.
    fn spawn_load(&self, ticket: LoadTicket) {
        let source = Arc::clone(&self.source);
        let outcomes_tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let outcome = loader::fetch(source.as_ref(), ticket).await;
            if outcomes_tx.send(outcome).is_err() {
                tracing::debug!("app closed before project load finished");
            }
        });
    }

    fn apply_finished_loads(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.projects_state.apply_load(outcome);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::init(cli)?;
    logging::init(&settings.log_file)?;
    println!("Initializing employee projects...");
    tracing::info!(
        employee = %settings.identity,
        status = %settings.status_filter,
        "starting"
    );

    let source: Arc<dyn ProjectSource> = match &settings.source {
        SourceSettings::Database { url } => {
            let db = db::init(url).await?;
            println!("Database connection established");
            Arc::new(db)
        }
        SourceSettings::Fixture { path } => {
            tracing::info!(path = %path.display(), "reading projects from fixture");
            Arc::new(FixtureSource::new(path.clone()))
        }
    };

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Mounting the screen issues the first load
    let (mut projects_state, ticket) = EmployeeProjectsState::mount(settings.identity.clone());
    projects_state.set_search_term(&settings.search);
    projects_state.set_status_filter(settings.status_filter.clone());
    let mut app_state = AppState::new(source, projects_state);
    app_state.spawn_load(ticket);

    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("exiting with error: {err:#}");
        println!("Error: {}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        app_state.apply_finished_loads();

        terminal.draw(|f| render_employee_projects(f, &mut app_state.projects_state))?;

        match handle_input(&mut app_state.projects_state)? {
            Some(EmployeeProjectsAction::Exit) => break,
            Some(EmployeeProjectsAction::Load(ticket)) => app_state.spawn_load(ticket),
            None => {}
        }
    }

    Ok(())
}

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use money_burned_core::prelude::*;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

mod widgets;
use widgets::*;

#[derive(Parser, Debug)]
#[clap(version, about = "Makes the loss of time and money through the resources in use visible")]
struct Args {
    /// Resource list, entries separated by ';' or '+', each optionally
    /// prefixed with "name:" (e.g. "24,99;Manager:89 per MD;11")
    #[arg(short = 'r', long = "resources")]
    resources: Option<String>,

    /// More interactive, nicer looking live view
    #[arg(short = 'n', long = "nice")]
    nice: bool,

    /// List all available cost interval types and exit
    #[arg(short = 'c', long = "cost-types")]
    cost_types: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct AppConfig {
    nice: bool,
}

fn config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(".money-burned.json"))
}

fn load_config() -> Result<AppConfig> {
    let config_path = config_path()?;

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    } else {
        Ok(AppConfig::default())
    }
}

fn save_config(config: &AppConfig) -> Result<()> {
    let config_path = config_path()?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content)?;
    Ok(())
}

pub struct AppState {
    pub session: RecordingSession,
    pub current_cost: f64,
    pub spinner_state: usize,
}

impl AppState {
    fn new(session: RecordingSession) -> Self {
        Self {
            session,
            current_cost: 0.0,
            spinner_state: 0,
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.current_cost = self.session.elapsed_cost()?;
        self.spinner_state = (self.spinner_state + 1) % 10;
        Ok(())
    }

    pub fn spinner_char(&self) -> char {
        match self.spinner_state {
            0 => '⠋',
            1 => '⠙',
            2 => '⠹',
            3 => '⠸',
            4 => '⠼',
            5 => '⠴',
            6 => '⠦',
            7 => '⠧',
            8 => '⠇',
            9 => '⠏',
            _ => '⠋',
        }
    }

    pub fn total_hourly_rate(&self) -> f64 {
        self.session.total_hourly_rate()
    }

    pub fn elapsed_text(&self) -> String {
        let total_seconds = self
            .session
            .elapsed()
            .map(|span| span.num_seconds().max(0))
            .unwrap_or(0);

        format!(
            "{}:{:02}:{:02}",
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60
        )
    }
}

pub struct App {
    state: AppState,
    exit: bool,
}

impl App {
    pub fn new(session: RecordingSession) -> Self {
        Self {
            state: AppState::new(session),
            exit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut tick_interval = interval(Duration::from_millis(500));

        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.state.tick()?;
                    terminal.draw(|frame| self.draw(frame))?;
                }

                _ = async {
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        if let Ok(event) = event::read() {
                            self.handle_event(event);
                        }
                    }
                } => {}
            }

            if self.exit {
                break;
            }
        }

        self.state.session.stop()?;
        Ok(())
    }

    pub fn into_session(self) -> RecordingSession {
        self.state.session
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        HeaderWidget::render(frame, chunks[0], &self.state);
        BurnWidget::render(frame, chunks[1], &self.state);
        ResourcesWidget::render(frame, chunks[2], &self.state);
        ShortcutsWidget::render(frame, chunks[3], &self.state);
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            if key_event.kind == KeyEventKind::Press {
                match key_event.code {
                    KeyCode::Enter | KeyCode::Char('q') => self.exit = true,
                    _ => {}
                }
            }
        }
    }
}

async fn run_plain(session: &mut RecordingSession) -> Result<()> {
    terminal::enable_raw_mode()?;
    let outcome = plain_loop(session).await;
    terminal::disable_raw_mode()?;
    outcome
}

async fn plain_loop(session: &mut RecordingSession) -> Result<()> {
    let mut tick_interval = interval(Duration::from_millis(1000));

    print!("Recording - press Enter to stop... ");
    io::stdout().flush()?;

    loop {
        tick_interval.tick().await;

        print!("${:.2}.. ", session.elapsed_cost()?);
        io::stdout().flush()?;

        if stop_requested()? {
            break;
        }
    }

    session.stop()?;
    print!("\r\n");
    Ok(())
}

fn stop_requested() -> Result<bool> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press
                && matches!(key_event.code, KeyCode::Enter | KeyCode::Char('q'))
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn prompt_for_resources(registry: &mut ResourceRegistry) -> Result<()> {
    loop {
        let answer = prompt("Want to add a resource? [Y/n]: ")?;
        let answer = answer.trim().to_lowercase();

        if answer == "n" {
            break;
        }
        if !answer.is_empty() && answer != "y" {
            continue;
        }

        let name = prompt("Enter a resource name: ")?;
        let cost = prompt("Enter a resource cost: ")?;
        match registry.add_parsed(Some(name.trim()), cost.trim()) {
            Ok(resource) => println!("{} was added...", resource),
            Err(error) => println!("Resource couldn't be added: {}", error),
        }
        println!();
    }

    Ok(())
}

fn print_cost_types() {
    let unit_table = UnitTable::new();

    println!("To deviate from the standard hourly scope of a cost, append a slash,");
    println!("'per' or 'à' after the amount, followed by one of these interval codes:");
    println!();

    println!("Standard cost types:");
    for unit in unit_table.units().iter().filter(|u| !u.is_labor_based()) {
        println!("  - {}: {}", unit.name(), unit.synonyms().join(", "));
    }

    println!();
    println!("Labor-based cost types:");
    for unit in unit_table.units().iter().filter(|u| u.is_labor_based()) {
        println!(
            "  - {}: {} [{} h]",
            unit.name(),
            unit.synonyms().join(", "),
            unit.hours()
        );
    }

    println!();
    println!("Whether a resource is labor-based or total-cost based depends on whether");
    println!("it is available to you around the clock or only during working hours.");
    println!();
    println!("Example:");
    println!("  money-burned -r \"Consultant:1100 per MD; Rental:92/d; Co-Working-Space:35\"");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.cost_types {
        print_cost_types();
        return Ok(());
    }

    let mut config = load_config().unwrap_or_default();
    if args.nice && !config.nice {
        config.nice = true;
        if let Err(e) = save_config(&config) {
            eprintln!("Warning: could not save config: {}", e);
        }
    }
    let nice = args.nice || config.nice;

    let mut registry = ResourceRegistry::new();
    if let Some(resource_list) = &args.resources {
        let parser = CostParser::new();
        let (resources, errors) = parser.parse_resource_list(resource_list).into_parts();
        for error in errors {
            eprintln!("Skipping resource: {}", error);
        }
        for resource in resources {
            registry.add(resource);
        }
    }

    if registry.is_empty() {
        prompt_for_resources(&mut registry)?;
    }
    if registry.is_empty() {
        println!("Without any resources there is nothing to record. Good bye.");
        return Ok(());
    }

    println!("Resources...");
    for resource in registry.iter() {
        println!("  - {}", resource);
    }
    println!("Total burn rate: ${:.2}/h", registry.total_hourly_rate());
    println!();

    let mut session = RecordingSession::new(&registry);
    prompt("Press Enter to start recording (Ctrl+C to abort)...")?;
    session.start()?;

    let session = if nice {
        let mut terminal = ratatui::init();
        let mut app = App::new(session);
        let outcome = app.run(&mut terminal).await;
        ratatui::restore();
        outcome?;
        app.into_session()
    } else {
        run_plain(&mut session).await?;
        session
    };

    println!("{}", session);
    println!("Finished at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

use organism_planner::simulation::{
    environment::{ElMazeGame, Environment, TeeMazeGame},
    organism::{Organism, StoreSizeWatch},
    planning::CandidateAction,
    trials::{run_trials, Policy, TrialConfig},
    PlannerConfig,
};
use organism_planner::ui::{draw_ui, DashboardState};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameKind {
    El,
    Tee,
}

/// Watch an organism learn to walk a maze, or measure how fast it learns.
#[derive(Parser, Debug)]
#[command(name = "organism_planner")]
struct Args {
    /// Maze to play
    #[arg(long, value_enum, default_value = "el")]
    game: GameKind,

    /// Hallway length before the bend
    #[arg(long, default_value = "3")]
    before: u32,

    /// Hallway length after the bend
    #[arg(long, default_value = "2")]
    after: u32,

    /// Lookahead depth (overrides the config file)
    #[arg(long, short = 'd')]
    depth: Option<u32>,

    /// RNG seed
    #[arg(long, short = 's', default_value = "0")]
    seed: u64,

    /// JSON planner configuration
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Run trials without the terminal UI and print statistics
    #[arg(long)]
    headless: bool,

    /// Number of independent organisms (headless)
    #[arg(long, default_value = "10")]
    trials: usize,

    /// Games per organism (headless)
    #[arg(long, default_value = "20")]
    runs: usize,

    /// Act randomly instead of planning
    #[arg(long)]
    baseline: bool,

    /// Milliseconds per turn in the terminal UI
    #[arg(long, default_value = "200")]
    tick_ms: u64,
}

impl Args {
    fn new_game(&self, rng: &mut StdRng) -> Box<dyn Environment> {
        match self.game {
            GameKind::El => Box::new(ElMazeGame::new(self.before, self.after, rng)),
            GameKind::Tee => Box::new(TeeMazeGame::new(self.before, self.after)),
        }
    }

    fn planner_config(&self, game: &dyn Environment) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => PlannerConfig::for_player(&game.player_config()),
        };
        if let Some(depth) = self.depth {
            config.recursion_depth = depth;
        }
        config.seed = Some(self.seed);
        config.validate()?;
        Ok(config)
    }

    const fn policy(&self) -> Policy {
        if self.baseline {
            Policy::Random
        } else {
            Policy::Planner
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let default_filter = if args.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let probe = args.new_game(&mut rng);
    let config = args.planner_config(probe.as_ref())?;

    if args.headless {
        return run_headless(&args, &config);
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let organism = Organism::configure(config)?.with_maintenance(StoreSizeWatch::default());
    let tick_rate = Duration::from_millis(args.tick_ms);

    let res = run_app(&mut terminal, &args, organism, &mut rng, tick_rate);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_headless(args: &Args, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let trial_config = TrialConfig {
        trials: args.trials,
        runs: args.runs,
        base_seed: args.seed,
        policy: args.policy(),
    };
    info!(
        "running {} trials x {} runs ({:?}, depth {})",
        trial_config.trials, trial_config.runs, trial_config.policy, config.recursion_depth
    );

    let report = run_trials(&trial_config, config, |rng| args.new_game(rng))?;

    println!();
    println!("RESULTS");
    for (run, mean) in report.mean_by_run().iter().enumerate() {
        println!("run {:4}: {mean:8.2} turns", run + 1);
    }
    let (mean, stdev) = report.summary();
    println!("# turns to completion: {mean:.2} +- {stdev:.2}");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
    mut organism: Organism,
    rng: &mut StdRng,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = args.new_game(rng);
    let mut last_action: Option<CandidateAction> = None;
    let mut games_won = 0;
    let mut last_tick = Instant::now();

    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            if game.eof() {
                organism.handle_sensor_input(game.sensors())?;
                organism.maintenance();
                organism.reset_state();
                info!("{} finished in {} turns", game.title(), game.turn());
                if game.won() {
                    games_won += 1;
                }
                game = args.new_game(rng);
                last_action = None;
            } else {
                organism.handle_sensor_input(game.sensors())?;
                let action = organism.choose_action(None)?;
                game.act(&action.actuators);
                last_action = Some(action);
            }
            last_tick = Instant::now();
        }

        // 2. Render
        let state = DashboardState::capture(game.as_ref(), &organism, last_action.as_ref(), games_won);
        terminal.draw(|f| draw_ui(f, &state))?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}

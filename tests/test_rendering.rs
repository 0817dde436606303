use organism_planner::simulation::environment::{Cardinal, ElMazeGame, Environment};
use organism_planner::simulation::{Organism, PlannerConfig};
use organism_planner::ui::{draw_ui, DashboardState};
use ratatui::{backend::TestBackend, Terminal};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_dashboard_draws_maze_and_plan() {
    let mut game = ElMazeGame::with_orientation(3, 2, Cardinal::North);
    let mut config = PlannerConfig::for_player(&game.player_config()).with_seed(4);
    config.outcomes.num_generate = 8;
    let mut organism = Organism::configure(config).unwrap();

    organism.handle_sensor_input(game.sensors()).unwrap();
    let action = organism.choose_action(None).unwrap();
    game.act(&action.actuators);

    let state = DashboardState::capture(&game, &organism, Some(&action), 3);
    assert_eq!(state.games_won, 3);
    assert!(state.plan[1].starts_with("Action: ACTION"));

    let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
    terminal.draw(|f| draw_ui(f, &state)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Maze"));
    assert!(text.contains("Plan (q to quit)"));
    assert!(text.contains("Won: 3"));
    assert!(text.contains('*'));
}

#[test]
fn test_dashboard_survives_tiny_terminal() {
    let game = ElMazeGame::with_orientation(5, 5, Cardinal::West);
    let organism =
        Organism::configure(PlannerConfig::for_player(&game.player_config()).with_seed(4))
            .unwrap();
    let state = DashboardState::capture(&game, &organism, None, 0);

    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|f| draw_ui(f, &state)).unwrap();
}

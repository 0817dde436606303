use crate::simulation::environment::Environment;
use crate::simulation::organism::Organism;
use crate::simulation::planning::CandidateAction;

/// Everything drawn in one frame, as plain text.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub hud: String,
    pub field: Vec<String>,
    pub plan: Vec<String>,
    pub games_won: u32,
}

impl DashboardState {
    /// Captures the game board and the organism's current plan.
    #[must_use]
    pub fn capture<E: Environment + ?Sized>(
        game: &E,
        organism: &Organism,
        last_action: Option<&CandidateAction>,
        games_won: u32,
    ) -> Self {
        let experience = organism.experience();
        let hud = format!(
            "{} | Turn: {} | Won: {} | Records: {} | Situations: {} | Depth: {}",
            game.title(),
            game.turn(),
            games_won,
            experience.len(),
            experience.situations(),
            organism.config().recursion_depth,
        );

        let (sensor_labels, actuator_labels) = game.labels();
        let mut plan = Vec::new();

        let sensors = game.sensors();
        let active: Vec<&str> = sensor_labels
            .iter()
            .enumerate()
            .filter(|(i, _)| sensors.get(*i).unwrap_or(false))
            .map(|(_, label)| *label)
            .collect();
        plan.push(format!("Senses: {sensors} {active:?}"));

        match last_action {
            Some(action) => {
                let commands: Vec<&str> = actuator_labels
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| action.actuators.get(*i).unwrap_or(false))
                    .map(|(_, label)| *label)
                    .collect();
                plan.push(format!("Action: {action} {commands:?}"));
                if action.outcomes.is_empty() {
                    plan.push("(action has no outcomes)".to_string());
                } else {
                    plan.push("Expected outcomes:".to_string());
                    plan.extend(action.outcomes.iter().map(|o| format!("  {o}")));
                }
            }
            None => plan.push("Action: (none yet)".to_string()),
        }

        Self {
            hud,
            field: game.render(),
            plan,
            games_won,
        }
    }
}

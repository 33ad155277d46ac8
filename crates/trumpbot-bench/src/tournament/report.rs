use std::fs;
use std::path::Path;

use trumpbot_core::model::player::PlayerPosition;

use super::{HandOutcome, RunnerError};
use crate::config::{AgentConfig, BenchmarkConfig};

struct AgentTotals {
    name: String,
    kind: String,
    seat: PlayerPosition,
    tricks: u64,
    hands_won: u64,
}

/// Running per-agent totals rendered into the Markdown summary.
pub(super) struct Standings {
    agents: Vec<AgentTotals>,
    hands: u64,
}

impl Standings {
    pub(super) fn new(agents: &[AgentConfig]) -> Self {
        let agents = PlayerPosition::LOOP
            .iter()
            .zip(agents)
            .map(|(&seat, agent)| AgentTotals {
                name: agent.name.clone(),
                kind: format!("{:?}", agent.kind).to_ascii_lowercase(),
                seat,
                tricks: 0,
                hands_won: 0,
            })
            .collect();
        Self { agents, hands: 0 }
    }

    pub(super) fn record(&mut self, outcome: &HandOutcome) {
        self.hands += 1;
        let best = outcome.tricks_won.iter().copied().max().unwrap_or(0);
        for totals in &mut self.agents {
            let tricks = outcome.tricks_won[totals.seat.index()];
            totals.tricks += u64::from(tricks);
            if tricks == best {
                totals.hands_won += 1;
            }
        }
    }

    fn average(&self, totals: &AgentTotals) -> f64 {
        if self.hands == 0 {
            0.0
        } else {
            totals.tricks as f64 / self.hands as f64
        }
    }

    pub(super) fn render(&self, config: &BenchmarkConfig) -> String {
        let mut text = format!(
            "# Run `{}`\n\n{} hands, trump mode `{:?}`.\n\n| Agent | Kind | Seat | Tricks | Avg tricks/hand | Hands topped |\n|---|---|---|---:|---:|---:|\n",
            config.run_id, self.hands, config.trump
        );
        for totals in &self.agents {
            text.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} | {} |\n",
                totals.name,
                totals.kind,
                totals.seat,
                totals.tricks,
                self.average(totals),
                totals.hands_won
            ));
        }
        text
    }

    pub(super) fn write_markdown(
        &self,
        path: &Path,
        config: &BenchmarkConfig,
    ) -> Result<(), RunnerError> {
        fs::write(path, self.render(config))?;
        Ok(())
    }
}

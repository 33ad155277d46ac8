mod report;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};
use trumpbot_bot::{DecisionError, Policy, PolicyContext, PolicyKind};
use trumpbot_core::model::card::Card;
use trumpbot_core::model::deck::Deck;
use trumpbot_core::model::player::{Player, PlayerPosition};
use trumpbot_core::model::suit::Suit;
use trumpbot_core::model::trick::{Trick, TrickError, legal_cards};

use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs};
use crate::telemetry::{TelemetryError, TelemetrySummary, append_to_markdown, summarise_telemetry};
use report::Standings;

const TRICKS_PER_HAND: usize = 13;

/// Plays seeded hands between four configured policies.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub hands_played: usize,
    pub rows_written: usize,
    pub decisions: usize,
    pub elapsed: Duration,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry: Option<TelemetrySummary>,
}

impl TournamentRunner {
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.agents.len() != PlayerPosition::LOOP.len() {
            return Err(RunnerError::SeatCount {
                found: config.agents.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    /// Execute every hand, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let started = Instant::now();
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut standings = Standings::new(&self.config.agents);
        let mut rows_written = 0usize;
        let mut decisions = 0usize;

        for hand_index in 0..self.config.deals.hands {
            let deal_seed = rng.next_u64();
            let trump = self.config.trump.for_hand(hand_index);
            let outcome = play_hand(&self.config.agents, deal_seed, trump)?;
            decisions += outcome.decisions;
            standings.record(&outcome);
            rows_written +=
                write_hand_rows(&mut writer, &self.config, hand_index, deal_seed, &outcome)?;

            event!(
                target: "trumpbot_bench::tournament",
                Level::INFO,
                run_id = %self.config.run_id,
                hand_index,
                trump = ?trump,
                tricks = ?outcome.tricks_won,
            );
        }

        writer.flush()?;
        standings.write_markdown(&self.outputs.summary_md, &self.config)?;

        let telemetry = if self.config.logging.enable_structured {
            let path = self.outputs.report_dir().join("telemetry.jsonl");
            let summary = summarise_telemetry(&path)?;
            append_to_markdown(&self.outputs.summary_md, &summary)?;
            Some(summary)
        } else {
            None
        };

        Ok(RunSummary {
            hands_played: self.config.deals.hands,
            rows_written,
            decisions,
            elapsed: started.elapsed(),
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry,
        })
    }
}

/// Result of one fully played hand.
#[derive(Debug, Clone)]
pub struct HandOutcome {
    pub trump: Option<Suit>,
    pub tricks_won: [u8; 4],
    pub decisions: usize,
}

struct Seat {
    player: Player,
    policy: Box<dyn Policy>,
}

/// Deals from `deal_seed` and plays all tricks; North leads first, winners lead after.
pub fn play_hand(
    agents: &[AgentConfig],
    deal_seed: u64,
    trump: Option<Suit>,
) -> Result<HandOutcome, RunnerError> {
    let hands = Deck::shuffled_with_seed(deal_seed).deal();
    let mut seats: Vec<Seat> = PlayerPosition::LOOP
        .iter()
        .zip(hands)
        .zip(agents)
        .map(|((&position, hand), agent)| Seat {
            player: Player::new(position, hand),
            policy: agent.kind.build(deal_seed ^ position.index() as u64),
        })
        .collect();
    if seats.len() != PlayerPosition::LOOP.len() {
        return Err(RunnerError::SeatCount { found: seats.len() });
    }

    let mut tricks_won = [0u8; 4];
    let mut decisions = 0usize;
    let mut leader = PlayerPosition::North;

    for _ in 0..TRICKS_PER_HAND {
        let mut trick = Trick::new(leader, trump);
        while !trick.is_complete() {
            let position = trick.expected_position();
            let seat = &mut seats[position.index()];
            let ctx = PolicyContext {
                seat: position,
                hand: seat.player.hand(),
                trick: &trick,
            };
            let card = seat.policy.choose_play(&ctx)?;
            if !legal_cards(seat.player.hand(), &trick).contains(&card) {
                return Err(RunnerError::IllegalPlay {
                    policy: seat.policy.name().to_string(),
                    seat: position,
                    card,
                });
            }
            seat.player.play(card);
            trick.play(position, card)?;
            decisions += 1;
        }

        leader = trick
            .winner()
            .ok_or_else(|| RunnerError::game("completed trick has no winner".to_string()))?;
        tricks_won[leader.index()] += 1;
    }

    Ok(HandOutcome {
        trump,
        tricks_won,
        decisions,
    })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DealLogRow<'a> {
    run_id: &'a str,
    deal_id: String,
    hand_index: usize,
    deal_seed: u64,
    trump: Option<Suit>,
    seat: &'static str,
    bot: &'a str,
    kind: PolicyKind,
    tricks: u8,
}

fn write_hand_rows(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    hand_index: usize,
    deal_seed: u64,
    outcome: &HandOutcome,
) -> Result<usize, RunnerError> {
    let deal_id = format!("H{hand_index:05}");
    let mut rows_written = 0usize;
    for (position, agent) in PlayerPosition::LOOP.iter().zip(&config.agents) {
        let row = DealLogRow {
            run_id: &config.run_id,
            deal_id: deal_id.clone(),
            hand_index,
            deal_seed,
            trump: outcome.trump,
            seat: seat_label(*position),
            bot: &agent.name,
            kind: agent.kind,
            tricks: outcome.tricks_won[position.index()],
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn seat_label(position: PlayerPosition) -> &'static str {
    match position {
        PlayerPosition::North => "north",
        PlayerPosition::East => "east",
        PlayerPosition::South => "south",
        PlayerPosition::West => "west",
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("policy failed to decide: {0}")]
    Decision(#[from] DecisionError),
    #[error("trick rejected a play: {0}")]
    Trick(#[from] TrickError),
    #[error("{policy} policy at {seat} played illegal card {card}")]
    IllegalPlay {
        policy: String,
        seat: PlayerPosition,
        card: Card,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 4 agents but found {found}")]
    SeatCount { found: usize },
    #[error("telemetry summarisation failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

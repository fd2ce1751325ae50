//! One game from setup to the last turn.

use std::io::{BufRead, Write};

use crate::policy::SeverPolicyV1;
use crate::protocol::{format_severance, read_agent_position, GameSetup, ProtocolError};
use crate::severer::{EdgeSeverer, SeverError, Severance};
use crate::store::{GraphStore, InMemoryGraph};
use crate::types::{ExitSet, NodeId};

/// Error type for a whole game run.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Setup could not be read, or reading turn input failed.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// An answer line could not be written.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Play a full game: read the setup from `input`, then answer every turn on
/// `output` until the input is exhausted.
///
/// A malformed turn line or a turn with nothing to cut is logged and gets no
/// answer; the game continues. A malformed setup, a failed read or a failed
/// write ends the run. On success the finished session is returned.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    policy: SeverPolicyV1,
) -> Result<GameSession, SessionError> {
    let setup = match GameSetup::read_from(input) {
        Ok(setup) => setup,
        Err(e) => {
            tracing::error!(error = %e, "failed to read game setup");
            return Err(e.into());
        }
    };
    let mut session = GameSession::from_setup(setup, policy);

    loop {
        let agent = match read_agent_position(input) {
            Ok(Some(agent)) => agent,
            Ok(None) => break,
            Err(ProtocolError::Io(e)) => {
                tracing::error!(error = %e, "failed to read turn input");
                return Err(ProtocolError::Io(e).into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed turn line");
                continue;
            }
        };

        match session.play_turn(agent) {
            Ok(severance) => {
                writeln!(output, "{}", format_severance(&severance))?;
                output.flush()?;
            }
            Err(e) => tracing::error!(error = %e, "no link to report this turn"),
        }
    }

    tracing::info!(
        turns = session.turns_played(),
        severed = session.severed().len(),
        "input closed, game over"
    );
    Ok(session)
}

/// Owns the graph and the exit set for a single game.
///
/// The session is the only owner of the graph. Each turn lends it mutably to
/// the severer and records the link that was cut.
#[derive(Debug, Clone)]
pub struct GameSession {
    graph: InMemoryGraph,
    exits: ExitSet,
    severer: EdgeSeverer,
    severed: Vec<Severance>,
    turns: u32,
}

impl GameSession {
    /// Create a session from a prepared graph and exit set.
    pub fn new(graph: InMemoryGraph, exits: ExitSet, policy: SeverPolicyV1) -> Self {
        tracing::info!(
            nodes = graph.num_nodes(),
            links = graph.num_edges(),
            exits = exits.len(),
            policy = %policy.policy_id(),
            params_hash = %policy.params_hash(),
            fingerprint = %graph.fingerprint(),
            "game session ready"
        );

        Self {
            graph,
            exits,
            severer: EdgeSeverer::new(policy),
            severed: Vec::new(),
            turns: 0,
        }
    }

    /// Build the graph from parsed setup input.
    pub fn from_setup(setup: GameSetup, policy: SeverPolicyV1) -> Self {
        let mut graph = InMemoryGraph::new();
        for link in &setup.links {
            graph.insert_edge(link.from, link.to);
        }

        if graph.num_edges() != setup.header.link_count {
            tracing::debug!(
                announced = setup.header.link_count,
                distinct = graph.num_edges(),
                "duplicate or self links collapsed during setup"
            );
        }
        if graph.num_nodes() > setup.header.node_count {
            tracing::warn!(
                announced = setup.header.node_count,
                seen = graph.num_nodes(),
                "links reference more nodes than the header announced"
            );
        }

        Self::new(graph, setup.exits, policy)
    }

    /// Play one turn with the agent on `agent`.
    ///
    /// On error nothing is cut and nothing is recorded, but the turn still
    /// counts.
    pub fn play_turn(&mut self, agent: NodeId) -> Result<Severance, SeverError> {
        self.turns = self.turns.saturating_add(1);
        let span = tracing::info_span!("turn", turn = self.turns, agent = %agent);
        let _guard = span.enter();

        let severance = self.severer.sever(&mut self.graph, agent, &self.exits)?;
        self.severed.push(severance);

        tracing::info!(
            edge = %severance.edge,
            exit_link = severance.is_exit_link(),
            remaining_links = self.graph.num_edges(),
            "link severed"
        );
        Ok(severance)
    }

    /// The current graph.
    pub fn graph(&self) -> &InMemoryGraph {
        &self.graph
    }

    /// The exit set.
    pub fn exits(&self) -> &ExitSet {
        &self.exits
    }

    /// Links cut so far, oldest first.
    pub fn severed(&self) -> &[Severance] {
        &self.severed
    }

    /// Number of turns played, failed turns included.
    pub fn turns_played(&self) -> u32 {
        self.turns
    }

    /// Get the severer.
    pub fn severer(&self) -> &EdgeSeverer {
        &self.severer
    }
}

//! Line protocol between the game referee and the severer.
//!
//! ## Format
//!
//! ```text
//! N L E          setup header: node count, link count, exit count
//! a b            L lines, one link each
//! e              E lines, one exit label each
//! s              one line per turn: the agent's node
//! ```
//!
//! Each turn is answered with one line `a b`: the agent's node, then the other
//! endpoint of the severed link. Blank lines between records are skipped.

use std::io::BufRead;

use crate::severer::Severance;
use crate::types::{Edge, ExitSet, NodeId};

/// Error type for protocol parsing.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Input ended before a required record.
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(String),
    /// A record had the wrong number of fields.
    #[error("Expected {expected} field(s) in {context}, found {found}")]
    FieldCount {
        /// Record being parsed.
        context: String,
        /// Number of fields required.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },
    /// A record was not valid UTF-8.
    #[error("Invalid UTF-8 in {0}")]
    InvalidEncoding(String),
    /// A field was not an integer.
    #[error("Invalid integer {value:?} in {context}")]
    InvalidInteger {
        /// Record being parsed.
        context: String,
        /// The offending text.
        value: String,
    },
}

/// Counts announced on the first setup line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupHeader {
    /// Total nodes in the level, exits included.
    pub node_count: usize,
    /// Number of link lines that follow.
    pub link_count: usize,
    /// Number of exit lines after the links.
    pub exit_count: usize,
}

/// Everything read before the first turn.
#[derive(Debug, Clone)]
pub struct GameSetup {
    /// The announced counts.
    pub header: SetupHeader,
    /// Links in input order.
    pub links: Vec<Edge>,
    /// Exits in input order.
    pub exits: ExitSet,
}

impl GameSetup {
    /// Read the header, links and exits from `reader`.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ProtocolError> {
        let line = next_record(reader, "setup header")?;
        let header = parse_header(&line)?;

        let mut links = Vec::with_capacity(header.link_count);
        for i in 0..header.link_count {
            let context = format!("link {} of {}", i + 1, header.link_count);
            let line = next_record(reader, &context)?;
            links.push(parse_link(&line, &context)?);
        }

        let mut exits = Vec::with_capacity(header.exit_count);
        for i in 0..header.exit_count {
            let context = format!("exit {} of {}", i + 1, header.exit_count);
            let line = next_record(reader, &context)?;
            exits.push(parse_node(&line, &context)?);
        }

        Ok(Self {
            header,
            links,
            exits: ExitSet::new(exits),
        })
    }
}

/// Read the agent's position for the next turn.
///
/// Returns `Ok(None)` once the input is exhausted.
pub fn read_agent_position<R: BufRead>(reader: &mut R) -> Result<Option<NodeId>, ProtocolError> {
    match read_record(reader, "agent position")? {
        Some(line) => parse_node(&line, "agent position").map(Some),
        None => Ok(None),
    }
}

/// Parse the `N L E` header line.
pub fn parse_header(line: &str) -> Result<SetupHeader, ProtocolError> {
    let [node_count, link_count, exit_count] = split_fields::<3>(line, "setup header")?;
    Ok(SetupHeader {
        node_count: parse_count(node_count, "setup header")?,
        link_count: parse_count(link_count, "setup header")?,
        exit_count: parse_count(exit_count, "setup header")?,
    })
}

/// Parse one `a b` link line.
pub fn parse_link(line: &str, context: &str) -> Result<Edge, ProtocolError> {
    let [a, b] = split_fields::<2>(line, context)?;
    Ok(Edge::new(parse_label(a, context)?, parse_label(b, context)?))
}

/// Parse a line holding a single node label.
pub fn parse_node(line: &str, context: &str) -> Result<NodeId, ProtocolError> {
    let [label] = split_fields::<1>(line, context)?;
    parse_label(label, context)
}

/// Format a severance as the answer line (without the newline).
pub fn format_severance(severance: &Severance) -> String {
    severance.edge.to_string()
}

fn split_fields<'a, const N: usize>(line: &'a str, context: &str) -> Result<[&'a str; N], ProtocolError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let found = fields.len();
    fields.try_into().map_err(|_| ProtocolError::FieldCount {
        context: context.to_string(),
        expected: N,
        found,
    })
}

fn parse_label(field: &str, context: &str) -> Result<NodeId, ProtocolError> {
    NodeId::parse(field).map_err(|_| ProtocolError::InvalidInteger {
        context: context.to_string(),
        value: field.to_string(),
    })
}

fn parse_count(field: &str, context: &str) -> Result<usize, ProtocolError> {
    field.parse().map_err(|_| ProtocolError::InvalidInteger {
        context: context.to_string(),
        value: field.to_string(),
    })
}

fn next_record<R: BufRead>(reader: &mut R, context: &str) -> Result<String, ProtocolError> {
    read_record(reader, context)?.ok_or_else(|| ProtocolError::UnexpectedEof(context.to_string()))
}

/// Next non-blank line, or `None` at end of input.
///
/// A line that is not UTF-8 is consumed and reported as
/// [`ProtocolError::InvalidEncoding`], so the reader stays usable.
fn read_record<R: BufRead>(reader: &mut R, context: &str) -> Result<Option<String>, ProtocolError> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = std::str::from_utf8(&buf)
            .map_err(|_| ProtocolError::InvalidEncoding(context.to_string()))?
            .trim();
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}

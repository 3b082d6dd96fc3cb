//! Instruction generation: node path → robot movement commands.
//!
//! The robot's heading is carried as a plain value through one generation
//! call. It starts at [`Heading::EAST`] for every call and is returned with
//! the result, so concurrent requests can never observe each other's
//! orientation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::RouteGraph;
use crate::model::{Coordinates, Instruction, Movement};
use crate::{Error, Result};

/// Facing direction in degrees, counter-clockwise from east.
///
/// With `y` growing downward, north is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(pub u32);

impl Heading {
    pub const EAST: Heading = Heading(0);
    pub const NORTH: Heading = Heading(90);
    pub const WEST: Heading = Heading(180);
    pub const SOUTH: Heading = Heading(270);

    /// Cardinal heading for a move from `from` to `to`.
    ///
    /// Horizontal wins only when strictly dominant; `|dx| == |dy|`
    /// resolves to the vertical axis.
    pub fn toward(from: Coordinates, to: Coordinates) -> Heading {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Heading::EAST } else { Heading::WEST }
        } else if dy < 0.0 {
            Heading::NORTH
        } else {
            Heading::SOUTH
        }
    }

    /// Turn needed to face `target`, in degrees `0..360`.
    pub fn turn_to(self, target: Heading) -> u32 {
        (target.0 % 360 + 360 - self.0 % 360) % 360
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::EAST
    }
}

/// Instructions for one path plus the heading the robot ends with.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionPlan {
    pub instructions: Vec<Instruction>,
    pub final_heading: Heading,
}

/// Generate one instruction per consecutive node pair of `path`.
///
/// Paths with fewer than two nodes produce nothing. A node without a
/// position in `graph` aborts the whole generation with
/// [`Error::InvalidPathNode`]. A pair with no directed edge in the graph is
/// emitted with distance 0 and logged.
pub fn generate(path: &[String], graph: &RouteGraph) -> Result<Vec<Instruction>> {
    generate_from(path, graph, Heading::default()).map(|plan| plan.instructions)
}

/// Like [`generate`], starting from an explicit heading.
pub fn generate_from(
    path: &[String],
    graph: &RouteGraph,
    initial: Heading,
) -> Result<InstructionPlan> {
    let mut heading = initial;
    let mut instructions = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let from_pos = graph
            .coordinates(from)
            .ok_or_else(|| Error::InvalidPathNode(from.clone()))?;
        let to_node = graph
            .get(to)
            .ok_or_else(|| Error::InvalidPathNode(to.clone()))?;

        let target = Heading::toward(from_pos, to_node.coordinates);
        let movement = Movement::from_turn(heading.turn_to(target));
        heading = target;

        let distance = graph.edge_weight(from, to).unwrap_or_else(|| {
            warn!(%from, %to, "path step has no directed edge; distance reported as 0");
            0.0
        });

        instructions.push(Instruction {
            instruction: movement,
            from: from.clone(),
            to: to.clone(),
            distance,
            shelf_id: to_node.shelf_id(),
        });
    }

    Ok(InstructionPlan { instructions, final_heading: heading })
}

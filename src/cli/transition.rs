//! `canopy transition` command.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::common::{Site, print_json};
use crate::content::Node;
use crate::workflow::{self, Capability, Transition, TransitionOutcome};

/// Request `event` on `name` as a user lacking the `deny` capabilities.
///
/// The change only lives in the in-memory store for the duration of the
/// command.
pub fn run_transition(
    site: &Site,
    name: &str,
    event: Transition,
    deny: &[Capability],
    json: bool,
) -> Result<()> {
    let node = site.node(name)?;
    let caps = |cap: Capability, _: &Node| !deny.contains(&cap);

    let outcome = workflow::request(&site.store, node.id, event, &caps)?;

    if json {
        return print_json(&outcome);
    }

    match &outcome {
        TransitionOutcome::Applied { node, from } => {
            crate::log!("workflow"; "{}: {} {} {}", node.name, from, "→".dimmed(), node.status.bold());
        }
        TransitionOutcome::Blocked(failure) => {
            crate::log!("error"; "{}", failure);
        }
        TransitionOutcome::Invalid { from, transition } => {
            crate::log!("error"; "cannot {} a {} node", transition, from);
        }
    }
    Ok(())
}

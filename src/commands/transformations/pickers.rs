//! Source and destination selection shared by the transformation commands.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::{ITEMS_PER_PAGE, IngestionClient};
use crate::factory::Factory;
use crate::io::PickerItem;
use crate::types::{DestinationCreate, DestinationType, SourceType};

const LINKED_TITLE: &str =
    "destination already has a transformation linked. Do you still want to link a new transformation?";
const LINKED_CHOICES: [(&str, Decision); 3] = [
    ("Replace the existing transformation with the new one", Decision::Replace),
    ("Clone the destination and attach the new transformation to it", Decision::Clone),
    ("Keep the existing transformation and quit the program", Decision::Keep),
];

const TASKS_TITLE: &str = "destination is attached to some tasks. If you link a new transformation, the existing tasks will be affected. What do you want to do?";
const TASKS_CHOICES: [(&str, Decision); 3] = [
    (
        "Replace the existing transformation in the destination (will affect existing tasks!)",
        Decision::Replace,
    ),
    (
        "Clone the destination and attach the transformation to the new destination",
        Decision::Clone,
    ),
    ("Don't link the transformation and quit the program", Decision::Keep),
];

/// Checks that `id` is a UUID, as every ingestion resource ID is.
pub fn ensure_uuid(kind: &str, id: &str) -> Result<()> {
    Uuid::parse_str(id).with_context(|| format!("invalid {} ID '{}', expected a UUID", kind, id))?;
    Ok(())
}

/// Let the user pick one of the sampleable sources.
pub async fn pick_source(f: &mut Factory, client: &IngestionClient) -> Result<String> {
    f.io.start_progress("Listing sources");
    let res = client
        .list_sources(&SourceType::SAMPLEABLE, ITEMS_PER_PAGE)
        .await;
    f.io.stop_progress();

    let items = res?
        .sources
        .into_iter()
        .map(|s| PickerItem::new(format!("{}: {}", s.source_type, s.name), s.source_id))
        .collect();

    f.prompter
        .select("sources", items)?
        .context("no source selected")
}

/// The first record the source yields.
pub async fn sample_source(
    f: &mut Factory,
    client: &IngestionClient,
    source_id: &str,
) -> Result<Map<String, Value>> {
    f.io.start_progress(format!("Sampling source {}", source_id));
    let res = client.validate_source(source_id).await;
    f.io.stop_progress();
    let res = res?;

    res.first_record()
        .cloned()
        .with_context(|| format!("unable to sample source {}: {}", source_id, res.message))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Replace,
    Clone,
    Keep,
}

impl Decision {
    fn as_str(&self) -> &'static str {
        match self {
            Decision::Replace => "replace",
            Decision::Clone => "clone",
            Decision::Keep => "keep",
        }
    }
}

/// Quitting the picker counts as `Keep`.
fn decide(f: &mut Factory, title: &str, choices: &[(&str, Decision)]) -> Result<Decision> {
    let items = choices
        .iter()
        .map(|(label, d)| PickerItem::new(*label, d.as_str()))
        .collect();

    let Some(value) = f.prompter.select(title, items)? else {
        return Ok(Decision::Keep);
    };

    Ok(choices
        .iter()
        .map(|(_, d)| *d)
        .find(|d| d.as_str() == value)
        .unwrap_or(Decision::Keep))
}

/// Let the user pick the search destination to link to.
///
/// Returns `None` when the user backs out.
pub async fn pick_destination(
    f: &mut Factory,
    client: &IngestionClient,
) -> Result<Option<String>> {
    f.io.start_progress("Listing destinations");
    let res = client
        .list_destinations(&[DestinationType::Search], ITEMS_PER_PAGE)
        .await;
    f.io.stop_progress();

    let mut linked = HashSet::new();
    let mut items = Vec::new();
    for destination in res?.destinations {
        let mut label = match destination.index_name() {
            Some(index) => format!("{}: {}", index, destination.name),
            None => destination.name.clone(),
        };
        if destination.is_linked() {
            label.push_str(" (linked)");
            linked.insert(destination.destination_id.clone());
        }
        items.push(PickerItem::new(label, destination.destination_id));
    }

    let Some(mut choice) = f.prompter.select("destinations", items)? else {
        return Ok(None);
    };

    if linked.contains(&choice) {
        match decide(f, LINKED_TITLE, &LINKED_CHOICES)? {
            Decision::Replace => {}
            Decision::Clone => choice = clone_destination(client, &choice).await?,
            Decision::Keep => return Ok(None),
        }
    }

    let tasks = client.list_tasks_for_destination(&choice).await?;
    if !tasks.tasks.is_empty() {
        return match decide(f, TASKS_TITLE, &TASKS_CHOICES)? {
            Decision::Replace => Ok(Some(choice)),
            Decision::Clone => Ok(Some(clone_destination(client, &choice).await?)),
            Decision::Keep => Ok(None),
        };
    }

    Ok(Some(choice))
}

/// Copy a destination under a timestamped name and return the new ID.
async fn clone_destination(client: &IngestionClient, destination_id: &str) -> Result<String> {
    let destination = client.get_destination(destination_id).await?;

    let create = DestinationCreate {
        destination_type: destination.destination_type,
        name: format!(
            "{} (clone - {})",
            destination.name,
            Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
        ),
        input: destination.input,
        authentication_id: destination.authentication_id,
    };

    let res = client.create_destination(&create).await?;
    tracing::debug!(from = destination_id, to = %res.destination_id, "cloned destination");

    Ok(res.destination_id)
}

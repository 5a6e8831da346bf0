//! Generic handlers, one per verb
//!
//! Every handler issues exactly one request through the executor and turns the
//! response into a [`CommandOutput`]. Errors from the executor are returned
//! unchanged.

pub mod create;
pub mod delete;
pub mod list;
pub mod show;

use anyhow::Result;
use log::info;
use serde_json::Value;

use crate::api::RequestExecutor;
use crate::output::CommandOutput;
use crate::resource::{ArgValues, ResourceCommandDescriptor, Verb};

pub use create::create_command;
pub use delete::delete_command;
pub use list::list_command;
pub use show::show_command;

/// Generic list parameters passed through to the server verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub marker: Option<String>,
    /// `KEY=VALUE` filters, in command-line order
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(marker) = &self.marker {
            query.push(("marker".to_string(), marker.clone()));
        }
        query.extend(self.filters.iter().cloned());
        query
    }
}

/// Everything parsed from the command line for one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Resource-specific argument values
    pub values: ArgValues,
    /// Record id, show and delete only
    pub id: Option<String>,
    pub list: ListParams,
}

/// Run the handler matching the descriptor's verb
pub async fn execute(
    descriptor: &ResourceCommandDescriptor,
    invocation: &Invocation,
    executor: &dyn RequestExecutor,
) -> Result<CommandOutput> {
    info!("Running {} {}", descriptor.verb, descriptor.resource_singular());

    match descriptor.verb {
        Verb::List => list_command(descriptor, &invocation.list, executor).await,
        Verb::Create => create_command(descriptor, &invocation.values, executor).await,
        Verb::Show => show_command(descriptor, required_id(descriptor, invocation)?, executor).await,
        Verb::Delete => delete_command(descriptor, required_id(descriptor, invocation)?, executor).await,
    }
}

fn required_id<'a>(descriptor: &ResourceCommandDescriptor, invocation: &'a Invocation) -> Result<&'a str> {
    invocation
        .id
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Missing {} id", descriptor.resource_singular()))
}

/// Fields of a single-record response, unwrapping the `{singular: {...}}` envelope
pub(crate) fn record_fields(descriptor: &ResourceCommandDescriptor, response: Option<Value>) -> Result<Vec<(String, Value)>> {
    let singular = descriptor.resource_singular();
    let response = response.ok_or_else(|| anyhow::anyhow!("Server returned no {} in its response", singular))?;

    let record = match response {
        Value::Object(mut envelope) => match envelope.remove(singular) {
            Some(Value::Object(record)) => record,
            Some(other) => anyhow::bail!("Expected '{}' to be an object, got: {}", singular, other),
            None => envelope,
        },
        other => anyhow::bail!("Unexpected response for {}: {}", singular, other),
    };

    Ok(record.into_iter().collect())
}

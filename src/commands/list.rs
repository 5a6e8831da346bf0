use anyhow::Result;
use log::debug;
use serde_json::Value;

use super::ListParams;
use crate::api::{ApiRequest, RequestExecutor};
use crate::output::CommandOutput;
use crate::resource::ResourceCommandDescriptor;

/// List the records of a resource, projected onto the declared columns
///
/// # Arguments
/// * `descriptor` - List descriptor naming the resource path and columns
/// * `params` - Generic pagination and filter parameters, sent as query
/// * `executor` - Executor performing the `GET`
///
/// # Returns
/// * `Ok(CommandOutput::Table)` - One row per record, in server order
/// * `Err(anyhow::Error)` - Transport, server or response shape error
pub async fn list_command(
    descriptor: &ResourceCommandDescriptor,
    params: &ListParams,
    executor: &dyn RequestExecutor,
) -> Result<CommandOutput> {
    let request = ApiRequest::get(descriptor.resource_path()).with_query(params.to_query());
    let response = executor.execute(&request).await?;

    let records = collection(descriptor, response.as_ref())?;
    debug!("Fetched {} {}", records.len(), descriptor.resource_plural());

    Ok(CommandOutput::Table {
        columns: descriptor.list_columns.iter().map(|column| column.to_string()).collect(),
        rows: project_rows(descriptor.list_columns, records),
    })
}

/// The records of a list response: the array under the plural key, or a bare array
fn collection<'a>(descriptor: &ResourceCommandDescriptor, response: Option<&'a Value>) -> Result<&'a [Value]> {
    let plural = descriptor.resource_plural();

    match response {
        Some(Value::Array(records)) => Ok(records.as_slice()),
        Some(Value::Object(envelope)) => envelope
            .get(plural)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow::anyhow!("Unexpected response: no '{}' collection", plural)),
        Some(other) => anyhow::bail!("Unexpected response for {}: {}", plural, other),
        None => anyhow::bail!("Server returned an empty response for {}", plural),
    }
}

/// Project records onto `columns`; absent fields become `Null`, extra fields are dropped
pub fn project_rows(columns: &[&str], records: &[Value]) -> Vec<Vec<Value>> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(*column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}

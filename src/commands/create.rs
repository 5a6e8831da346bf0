use anyhow::Result;
use log::debug;

use super::record_fields;
use crate::api::{ApiRequest, RequestExecutor};
use crate::output::CommandOutput;
use crate::resource::{ArgValues, ResourceCommandDescriptor, build_body};

/// Create a record from parsed arguments
///
/// # Arguments
/// * `descriptor` - Create descriptor holding the argument specs and body field map
/// * `values` - Parsed argument values keyed by destination
/// * `executor` - Executor performing the `POST`
///
/// # Returns
/// * `Ok(CommandOutput::Created)` - The record as returned by the server, empty if it sent no body
/// * `Err(anyhow::Error)` - Missing argument, transport or server error
pub async fn create_command(
    descriptor: &ResourceCommandDescriptor,
    values: &ArgValues,
    executor: &dyn RequestExecutor,
) -> Result<CommandOutput> {
    let body = build_body(descriptor, values)?;
    debug!("Create body: {}", body);

    let request = ApiRequest::post(descriptor.resource_path(), body);
    let response = executor.execute(&request).await?;

    // 201/204 without a body still means the record exists
    let fields = match response {
        Some(_) => record_fields(descriptor, response)?,
        None => Vec::new(),
    };

    Ok(CommandOutput::Created {
        resource: descriptor.resource_singular().to_string(),
        fields,
    })
}

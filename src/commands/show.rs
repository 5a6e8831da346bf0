use anyhow::Result;

use super::record_fields;
use crate::api::constants::record_path;
use crate::api::{ApiRequest, RequestExecutor};
use crate::output::CommandOutput;
use crate::resource::ResourceCommandDescriptor;

/// Fetch a single record by id
pub async fn show_command(
    descriptor: &ResourceCommandDescriptor,
    id: &str,
    executor: &dyn RequestExecutor,
) -> Result<CommandOutput> {
    let request = ApiRequest::get(record_path(descriptor.resource_path(), id));
    let response = executor.execute(&request).await?;

    Ok(CommandOutput::Record {
        fields: record_fields(descriptor, response)?,
    })
}

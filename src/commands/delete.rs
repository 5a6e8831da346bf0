use anyhow::Result;
use log::info;

use crate::api::constants::record_path;
use crate::api::{ApiRequest, RequestExecutor};
use crate::output::CommandOutput;
use crate::resource::ResourceCommandDescriptor;

/// Delete a record by id
///
/// No existence check is made; a missing record is whatever the server reports.
///
/// # Arguments
/// * `descriptor` - Delete descriptor naming the resource path
/// * `id` - Record id, appended to the resource path
/// * `executor` - Executor performing the `DELETE`
///
/// # Returns
/// * `Ok(CommandOutput::Deleted)` - The server accepted the deletion
/// * `Err(anyhow::Error)` - Transport or server error
pub async fn delete_command(
    descriptor: &ResourceCommandDescriptor,
    id: &str,
    executor: &dyn RequestExecutor,
) -> Result<CommandOutput> {
    let request = ApiRequest::delete(record_path(descriptor.resource_path(), id));
    executor.execute(&request).await?;

    info!("Deleted {} {}", descriptor.resource_singular(), id);
    Ok(CommandOutput::Deleted {
        resource: descriptor.resource_singular().to_string(),
        id: id.to_string(),
    })
}

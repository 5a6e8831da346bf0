//! Declarative description of one resource command

use anyhow::Result;
use std::fmt;

/// The verb a command performs against its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    List,
    Show,
    Create,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show => "show",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    /// Whether the command addresses a single record by id
    pub fn takes_id(&self) -> bool {
        matches!(self, Self::Show | Self::Delete)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A REST resource exposed by the networking service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Singular name, used as the request/response wrapper key (e.g., "route")
    pub singular: &'static str,
    /// Plural name, used as the list response collection key (e.g., "routes")
    pub plural: &'static str,
    /// Collection path (e.g., "/routes")
    pub path: &'static str,
}

impl Resource {
    pub const fn new(singular: &'static str, plural: &'static str, path: &'static str) -> Self {
        Self {
            singular,
            plural,
            path,
        }
    }
}

/// One CLI argument and where its value lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument name; flags are spelled `--<name>`
    pub name: &'static str,
    /// Destination key of the parsed value
    pub dest: &'static str,
    /// Placeholder shown in usage
    pub metavar: &'static str,
    pub help: &'static str,
    pub positional: bool,
    pub required: bool,
    /// Accumulates every occurrence into an ordered sequence
    pub repeatable: bool,
}

impl ArgumentSpec {
    /// A required positional argument
    pub const fn positional(name: &'static str, metavar: &'static str, help: &'static str) -> Self {
        Self {
            name,
            dest: name,
            metavar,
            help,
            positional: true,
            required: true,
            repeatable: false,
        }
    }

    /// An optional `--name VALUE` flag
    pub const fn flag(name: &'static str, metavar: &'static str, help: &'static str) -> Self {
        Self {
            name,
            dest: name,
            metavar,
            help,
            positional: false,
            required: false,
            repeatable: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub const fn dest(mut self, dest: &'static str) -> Self {
        self.dest = dest;
        self
    }
}

/// Everything needed to turn one CLI command into one API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCommandDescriptor {
    pub verb: Verb,
    pub resource: Resource,
    /// One-line help shown in `--help`
    pub about: &'static str,
    /// Output columns, list commands only
    pub list_columns: &'static [&'static str],
    pub argument_specs: &'static [ArgumentSpec],
    /// `(body field, argument destination)` pairs, create commands only
    pub body_field_map: &'static [(&'static str, &'static str)],
}

impl ResourceCommandDescriptor {
    pub const fn list(resource: Resource, about: &'static str, list_columns: &'static [&'static str]) -> Self {
        Self {
            verb: Verb::List,
            resource,
            about,
            list_columns,
            argument_specs: &[],
            body_field_map: &[],
        }
    }

    pub const fn show(resource: Resource, about: &'static str) -> Self {
        Self {
            verb: Verb::Show,
            resource,
            about,
            list_columns: &[],
            argument_specs: &[],
            body_field_map: &[],
        }
    }

    pub const fn create(
        resource: Resource,
        about: &'static str,
        argument_specs: &'static [ArgumentSpec],
        body_field_map: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            verb: Verb::Create,
            resource,
            about,
            list_columns: &[],
            argument_specs,
            body_field_map,
        }
    }

    pub const fn delete(resource: Resource, about: &'static str) -> Self {
        Self {
            verb: Verb::Delete,
            resource,
            about,
            list_columns: &[],
            argument_specs: &[],
            body_field_map: &[],
        }
    }

    pub fn resource_singular(&self) -> &'static str {
        self.resource.singular
    }

    pub fn resource_plural(&self) -> &'static str {
        self.resource.plural
    }

    pub fn resource_path(&self) -> &'static str {
        self.resource.path
    }

    /// Look up an argument by destination
    pub fn argument(&self, dest: &str) -> Option<&ArgumentSpec> {
        self.argument_specs.iter().find(|spec| spec.dest == dest)
    }

    /// Usage placeholder for the record id of show/delete commands
    pub fn id_metavar(&self) -> String {
        self.resource.singular.to_uppercase()
    }

    /// Check the invariants that do not depend on other descriptors
    pub fn validate(&self, command: &str) -> Result<()> {
        let path = self.resource.path;
        if path.is_empty() || !path.starts_with('/') {
            anyhow::bail!("Command '{}' has invalid resource path '{}'", command, path);
        }
        if self.resource.singular.is_empty() || self.resource.plural.is_empty() {
            anyhow::bail!("Command '{}' has an empty resource name", command);
        }
        if self.verb == Verb::List && self.list_columns.is_empty() {
            anyhow::bail!("List command '{}' declares no columns", command);
        }

        for (index, spec) in self.argument_specs.iter().enumerate() {
            if self.argument_specs[..index].iter().any(|other| other.dest == spec.dest) {
                anyhow::bail!("Command '{}' declares argument '{}' twice", command, spec.dest);
            }
            if spec.positional && spec.repeatable {
                anyhow::bail!("Positional argument '{}' of '{}' cannot be repeatable", spec.name, command);
            }
        }

        for (field, dest) in self.body_field_map {
            if self.argument(dest).is_none() {
                anyhow::bail!(
                    "Body field '{}' of '{}' refers to undeclared argument '{}'",
                    field,
                    command,
                    dest
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: Resource = Resource::new("route", "routes", "/routes");

    #[test]
    fn argument_builders_compose() {
        let spec = ArgumentSpec::flag("subnet_id", "SUBNET_ID", "Subnet")
            .repeatable()
            .dest("subnet_ids");

        assert_eq!(spec.name, "subnet_id");
        assert_eq!(spec.dest, "subnet_ids");
        assert!(spec.repeatable);
        assert!(!spec.required);
        assert!(!spec.positional);
    }

    #[test]
    fn id_metavar_is_upper_singular() {
        let descriptor = ResourceCommandDescriptor::delete(ROUTES, "Delete a route");
        assert_eq!(descriptor.id_metavar(), "ROUTE");
        assert!(descriptor.verb.takes_id());
    }

    #[test]
    fn validate_rejects_empty_path() {
        let descriptor = ResourceCommandDescriptor::delete(Resource::new("route", "routes", ""), "Delete");
        assert!(descriptor.validate("route-delete").is_err());
    }

    #[test]
    fn validate_rejects_list_without_columns() {
        let descriptor = ResourceCommandDescriptor::list(ROUTES, "List", &[]);
        assert!(descriptor.validate("route-list").is_err());
    }

    #[test]
    fn validate_rejects_unmapped_body_field() {
        const ARGS: &[ArgumentSpec] = &[ArgumentSpec::positional("cidr", "CIDR", "CIDR")];
        let descriptor = ResourceCommandDescriptor::create(ROUTES, "Create", ARGS, &[("gateway", "gateway")]);

        let err = descriptor.validate("route-create").unwrap_err();
        assert!(err.to_string().contains("undeclared argument 'gateway'"));
    }
}

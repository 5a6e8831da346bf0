//! Command name to descriptor lookup

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;

use super::descriptor::ResourceCommandDescriptor;
use super::quark;

/// Fixed mapping from command name (e.g., "route-create") to its descriptor
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, ResourceCommandDescriptor>,
}

impl CommandRegistry {
    /// Build a registry, rejecting duplicate names, invalid descriptors and
    /// paths shared by different resources
    pub fn new(entries: impl IntoIterator<Item = (&'static str, ResourceCommandDescriptor)>) -> Result<Self> {
        let mut commands: BTreeMap<&'static str, ResourceCommandDescriptor> = BTreeMap::new();

        for (name, descriptor) in entries {
            descriptor.validate(name)?;

            if commands.contains_key(name) {
                anyhow::bail!("Command '{}' is registered twice", name);
            }

            let collision = commands.iter().find(|(_, other)| {
                other.resource.path == descriptor.resource.path && other.resource != descriptor.resource
            });
            if let Some((other_name, other)) = collision {
                anyhow::bail!(
                    "Resource path '{}' of '{}' ({}) collides with '{}' ({})",
                    descriptor.resource.path,
                    name,
                    descriptor.resource.singular,
                    other_name,
                    other.resource.singular
                );
            }

            commands.insert(name, descriptor);
        }

        Ok(Self { commands })
    }

    pub fn get(&self, name: &str) -> Option<&ResourceCommandDescriptor> {
        self.commands.get(name)
    }

    /// Registered commands in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ResourceCommandDescriptor)> {
        self.commands.iter().map(|(name, descriptor)| (*name, descriptor))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

static REGISTRY: OnceCell<CommandRegistry> = OnceCell::new();

/// The process-wide registry of Quark extension commands
pub fn registry() -> Result<&'static CommandRegistry> {
    REGISTRY.get_or_try_init(|| CommandRegistry::new(quark::commands()))
}

//! Type-erased view of a configuration collection.

use std::any::Any;

use super::ConfigurationCollection;
use crate::descriptors::ConfigurationDescriptor;
use crate::key::AbstractionKey;

/// Operations the registry performs without knowing the abstraction type.
///
/// The registry stores one boxed collection per abstraction and downcasts it
/// back to `ConfigurationCollection<A>` when `A` is known again.
pub(crate) trait ErasedCollection: Any + Send {
    fn dispose_disposable_instances(&mut self) -> usize;

    fn len(&self) -> usize;

    fn describe(&self, key: &AbstractionKey, out: &mut Vec<ConfigurationDescriptor>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<A: ?Sized + Send + Sync + 'static> ErasedCollection for ConfigurationCollection<A> {
    fn dispose_disposable_instances(&mut self) -> usize {
        ConfigurationCollection::dispose_disposable_instances(self)
    }

    fn len(&self) -> usize {
        ConfigurationCollection::len(self)
    }

    fn describe(&self, key: &AbstractionKey, out: &mut Vec<ConfigurationDescriptor>) {
        out.extend(self.iter().enumerate().map(|(position, entry)| ConfigurationDescriptor {
            abstraction: key.type_name(),
            name: entry.name().map(str::to_string),
            lifetime: entry.lifetime(),
            implementation: entry.implementation(),
            has_instance: entry.cached_instance().is_some(),
            position,
        }));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

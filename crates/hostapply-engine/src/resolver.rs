//! Applying caller-supplied conflict resolutions.

use tracing::debug;

use hostapply_core::models::{AttributeValue, ConflictField, ConflictResolver};
use hostapply_core::types::{AttributeId, FxHashMap, HostId};

/// Resolutions grouped by host.
///
/// When the same `(host, attribute)` appears more than once the last entry
/// wins; the request validator rejects such input before it gets here.
#[derive(Debug, Default)]
pub struct ResolverIndex {
    by_host: FxHashMap<HostId, FxHashMap<AttributeId, AttributeValue>>,
}

impl ResolverIndex {
    pub fn new(resolvers: &[ConflictResolver]) -> Self {
        let mut by_host: FxHashMap<HostId, FxHashMap<AttributeId, AttributeValue>> =
            FxHashMap::default();
        for r in resolvers {
            by_host
                .entry(r.host_id)
                .or_default()
                .insert(r.attribute_id, r.property_value.clone());
        }
        Self { by_host }
    }

    pub fn for_host(&self, host_id: HostId) -> Option<&FxHashMap<AttributeId, AttributeValue>> {
        self.by_host.get(&host_id)
    }
}

/// What resolution did to one host's conflicts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Resolution {
    /// Values chosen by resolvers for conflicting attributes.
    pub resolved: Vec<(AttributeId, AttributeValue)>,
    /// Conflicts left open.
    pub unresolved_count: i64,
    /// Resolvers that matched no conflict and were ignored.
    pub ignored: usize,
}

/// Close every conflict that has a resolver.
///
/// A resolver only binds on a detected conflict. One targeting an attribute
/// that is not conflicting for this host is ignored, not reported as an error.
/// `normalize` is applied to resolver values before they are recorded.
pub fn apply_resolvers(
    host_id: HostId,
    conflicts: &mut [ConflictField],
    resolvers: Option<&FxHashMap<AttributeId, AttributeValue>>,
    normalize: impl Fn(&AttributeValue) -> AttributeValue,
) -> Resolution {
    let mut resolution = Resolution::default();
    for conflict in conflicts.iter_mut() {
        match resolvers.and_then(|r| r.get(&conflict.attribute_id)) {
            Some(value) => {
                let value = normalize(value);
                conflict.property_value = Some(value.clone());
                conflict.unresolved_conflict_exist = false;
                resolution.resolved.push((conflict.attribute_id, value));
            }
            None => resolution.unresolved_count += 1,
        }
    }

    if let Some(resolvers) = resolvers {
        resolution.ignored = resolvers.len() - resolution.resolved.len();
        if resolution.ignored > 0 {
            debug!(
                host_id = host_id.get(),
                ignored = resolution.ignored,
                "resolvers without a matching conflict ignored"
            );
        }
    }
    resolution
}

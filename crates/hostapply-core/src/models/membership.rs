//! Host membership in modules and module-to-template bindings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{HostId, ModuleId, ServiceTemplateId};

/// The modules a host currently belongs to (or would belong to after a move).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroupMembership {
    pub host_id: HostId,
    pub module_ids: Vec<ModuleId>,
}

impl HostGroupMembership {
    /// Build from raw ids.
    pub fn new(host_id: i64, module_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            host_id: HostId(host_id),
            module_ids: module_ids.into_iter().map(ModuleId::new).collect(),
        }
    }
}

/// How one module reaches its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBinding {
    /// Template the module was created from, if any.
    pub service_template_id: Option<ServiceTemplateId>,
    /// Host-apply switch on the module itself.
    pub module_apply_enabled: bool,
    /// Host-apply switch on the bound template.
    pub template_apply_enabled: bool,
}

impl ModuleBinding {
    /// A module without a template, with host-apply on or off.
    pub fn standalone(enabled: bool) -> Self {
        Self {
            service_template_id: None,
            module_apply_enabled: enabled,
            template_apply_enabled: false,
        }
    }

    /// A module bound to a template, with the template's host-apply on or off.
    pub fn templated(template_id: i64, enabled: bool) -> Self {
        Self {
            service_template_id: Some(ServiceTemplateId(template_id)),
            module_apply_enabled: false,
            template_apply_enabled: enabled,
        }
    }
}

/// Module bindings known to the caller.
///
/// Modules missing from the topology apply their own module-scoped rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeTopology {
    pub bindings: BTreeMap<ModuleId, ModuleBinding>,
}

impl ScopeTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn bind(mut self, module_id: i64, binding: ModuleBinding) -> Self {
        self.bindings.insert(ModuleId(module_id), binding);
        self
    }

    pub fn binding(&self, module_id: ModuleId) -> Option<&ModuleBinding> {
        self.bindings.get(&module_id)
    }
}

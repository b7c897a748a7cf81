//! The planning entry point.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use hostapply_core::config::{HostApplyConfig, PlannerConfig};
use hostapply_core::errors::PlanError;
use hostapply_core::models::{
    AttributeCatalog, AttributeMap, CandidateRule, ConflictResolver, HostGroupMembership, HostPlan,
    PlanResult, Rule, RuleSetEdit, ScopeTopology,
};
use hostapply_core::tracing::metrics;
use hostapply_core::traits::{TypedEquality, ValueEquality};
use hostapply_core::types::HostId;

use crate::aggregator::PlanAggregator;
use crate::assembler::PlanAssembler;
use crate::detector::ConflictDetector;
use crate::resolver::{apply_resolvers, ResolverIndex};
use crate::ruleset::apply_edit;
use crate::scope::ScopeIndex;
use crate::selector::{drop_shadowed_defaults, select_rules};
use crate::validate::RequestValidator;

/// Everything one planning invocation needs, supplied by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    pub rules: Vec<Rule>,
    pub rule_edit: Option<RuleSetEdit>,
    pub memberships: Vec<HostGroupMembership>,
    pub current_hosts: BTreeMap<HostId, AttributeMap>,
    pub resolvers: Vec<ConflictResolver>,
    /// Module bindings. Modules absent here apply their own rules.
    pub topology: ScopeTopology,
    /// When present, rules for attributes closed to auto-apply are skipped.
    pub catalog: Option<AttributeCatalog>,
}

/// Computes auto-apply plans.
///
/// Holds no state between invocations apart from its configuration, the
/// equality strategy and an optional worker pool, so one engine can serve
/// any number of concurrent callers.
pub struct PlanEngine {
    config: PlannerConfig,
    equality: Box<dyn ValueEquality>,
    pool: Option<rayon::ThreadPool>,
    validator: RequestValidator,
}

impl PlanEngine {
    /// Build an engine using `TypedEquality`. A dedicated worker pool is
    /// created when `threads` is set.
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        let pool = match config.effective_threads() {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("hostapply-plan-{i}"))
                    .build()
                    .map_err(|e| PlanError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            config,
            equality: Box::new(TypedEquality),
            pool,
            validator: RequestValidator::default(),
        })
    }

    /// Build an engine from a loaded configuration, limits included.
    pub fn from_config(config: &HostApplyConfig) -> Result<Self, PlanError> {
        let mut engine = Self::new(config.planner.clone())?;
        engine.validator = RequestValidator::new(config.limits.clone());
        Ok(engine)
    }

    /// Replace the value equality strategy.
    pub fn with_equality(mut self, equality: Box<dyn ValueEquality>) -> Self {
        self.equality = equality;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn equality(&self) -> &dyn ValueEquality {
        self.equality.as_ref()
    }

    /// Plan every host in the request. Never fails: malformed input degrades
    /// to ignored rules and resolvers.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult {
        let start = Instant::now();
        let span = info_span!(
            "hostapply.plan",
            plan_hosts = request.memberships.len(),
            plan_effective_rules = tracing::field::Empty,
            plan_unresolved_conflicts = tracing::field::Empty,
            plan_update_fields = tracing::field::Empty,
            plan_parallel = tracing::field::Empty,
            plan_duration_ms = tracing::field::Empty,
        );
        let _guard = span.enter();

        let effective_rules = apply_edit(&request.rules, request.rule_edit.as_ref());
        span.record(metrics::PLAN_EFFECTIVE_RULES, effective_rules.len());

        let plans = self.plan_hosts(request, &effective_rules, &span);

        let reported_rules = self
            .config
            .effective_include_effective_rules()
            .then_some(effective_rules);
        let result = PlanAggregator::new(self.config.effective_conflicts_first())
            .aggregate(plans, reported_rules);

        let update_fields: usize = result.plans.iter().map(|p| p.update_fields.len()).sum();
        let duration_ms = start.elapsed().as_millis() as u64;
        span.record(metrics::PLAN_UNRESOLVED_CONFLICTS, result.unresolved_conflict_count);
        span.record(metrics::PLAN_UPDATE_FIELDS, update_fields);
        span.record(metrics::PLAN_DURATION_MS, duration_ms);

        info!(
            hosts = result.host_count,
            update_fields,
            unresolved = result.unresolved_conflict_count,
            hosts_with_conflicts = result.hosts_with_unresolved_conflicts,
            duration_ms,
            "plan computed"
        );
        result
    }

    /// Validate the request, then plan it.
    pub fn plan_checked(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        let effective_rules = apply_edit(&request.rules, request.rule_edit.as_ref());
        self.validator.validate(request, &effective_rules)?;
        Ok(self.plan(request))
    }

    /// The rules in force for each host, with the module each was reached
    /// through. Host values play no part, so overridable defaults are listed
    /// even where the host already has a value.
    pub fn related_rules(&self, request: &PlanRequest) -> BTreeMap<HostId, Vec<CandidateRule>> {
        let effective_rules = apply_edit(&request.rules, request.rule_edit.as_ref());
        let index = ScopeIndex::new(
            &effective_rules,
            &request.topology,
            request.catalog.as_ref(),
        );
        request
            .memberships
            .iter()
            .map(|m| {
                let candidates = select_rules(&index, m)
                    .iter()
                    .map(|s| s.to_candidate())
                    .collect();
                (m.host_id, candidates)
            })
            .collect()
    }

    fn plan_hosts(
        &self,
        request: &PlanRequest,
        effective_rules: &[Rule],
        span: &tracing::Span,
    ) -> Vec<HostPlan> {
        let planner = HostPlanner {
            index: ScopeIndex::new(effective_rules, &request.topology, request.catalog.as_ref()),
            resolvers: ResolverIndex::new(&request.resolvers),
            current_hosts: &request.current_hosts,
            detector: ConflictDetector::new(
                self.equality.as_ref(),
                self.config.effective_trim_string_values(),
            ),
            assembler: PlanAssembler::new(self.equality.as_ref(), request.catalog.as_ref()),
        };

        let parallel = request.memberships.len() >= self.config.effective_parallel_threshold();
        span.record(metrics::PLAN_PARALLEL, parallel);
        if !parallel {
            return request.memberships.iter().map(|m| planner.plan_host(m)).collect();
        }

        let fan_out = || -> Vec<HostPlan> {
            request
                .memberships
                .par_iter()
                .map(|m| planner.plan_host(m))
                .collect()
        };
        match &self.pool {
            Some(pool) => pool.install(fan_out),
            None => fan_out(),
        }
    }
}

impl Default for PlanEngine {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            equality: Box::new(TypedEquality),
            pool: None,
            validator: RequestValidator::default(),
        }
    }
}

impl std::fmt::Debug for PlanEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanEngine")
            .field("config", &self.config)
            .field("equality", &self.equality.name())
            .field("pool_threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

/// Shared read-only state for planning individual hosts.
struct HostPlanner<'a> {
    index: ScopeIndex<'a>,
    resolvers: ResolverIndex,
    current_hosts: &'a BTreeMap<HostId, AttributeMap>,
    detector: ConflictDetector<'a>,
    assembler: PlanAssembler<'a>,
}

impl HostPlanner<'_> {
    fn plan_host(&self, membership: &HostGroupMembership) -> HostPlan {
        let current = self.current_hosts.get(&membership.host_id);
        let selected = drop_shadowed_defaults(select_rules(&self.index, membership), current);
        let mut detection = self.detector.detect(&selected);
        let resolution = apply_resolvers(
            membership.host_id,
            &mut detection.conflicts,
            self.resolvers.for_host(membership.host_id),
            |v| self.detector.normalize(v),
        );
        if !detection.conflicts.is_empty() {
            debug!(
                host_id = membership.host_id.get(),
                conflicts = detection.conflicts.len(),
                unresolved = resolution.unresolved_count,
                "conflicting rules"
            );
        }
        self.assembler.assemble(membership, current, detection, resolution)
    }
}

/// Plan with a default engine: typed equality, sequential below 64 hosts,
/// no topology or catalog.
pub fn plan(
    rules: Vec<Rule>,
    rule_edit: Option<RuleSetEdit>,
    memberships: Vec<HostGroupMembership>,
    current_hosts: BTreeMap<HostId, AttributeMap>,
    resolvers: Vec<ConflictResolver>,
) -> PlanResult {
    let request = PlanRequest {
        rules,
        rule_edit,
        memberships,
        current_hosts,
        resolvers,
        ..PlanRequest::default()
    };
    PlanEngine::default().plan(&request)
}

use log::trace;
use thiserror::Error;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagatorOutcome;
use crate::branching::Choice;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::engine::failure_counts::SharedFailureCounts;
use crate::engine::notifications::ModEvent;
use crate::engine::notifications::WatchKind;
use crate::engine::notifications::WatchListCP;
use crate::engine::propagator_store::PropagatorSlot;
use crate::engine::propagator_store::PropagatorStore;
use crate::engine::AgendaOrder;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::PropagatorQueue;
use crate::predicates::Predicate;
use crate::propagation::cancel_subscriptions;
use crate::propagation::AdviseContext;
use crate::propagation::CopyContext;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorCost;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::sapling_assert_extreme;
use crate::sapling_assert_moderate;
use crate::sapling_assert_simple;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::variables::DomainId;
use crate::engine::variables::StoreId;
use crate::variables::IntegerVariable;

create_statistics_struct!(
    /// Counters of the work performed by a [`State`].
    StateStatistics {
        /// The number of calls to [`Propagator::propagate`].
        num_propagations: u64,
        /// The number of calls to [`Propagator::advise`].
        num_advise_calls: u64,
        num_subsumptions: u64,
        num_failures: u64,
    }
);

/// Whether a [`State`] can still lead to a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateStatus {
    Stable,
    Failed,
}

/// A mismatch between the watch lists and the subscriptions recorded by the propagators, reported
/// by [`State::audit_subscriptions`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("{domain} has a watcher for {propagator_id} which the propagator did not record")]
    DanglingWatcher {
        domain: DomainId,
        propagator_id: PropagatorId,
    },
    #[error("{propagator_id} recorded a subscription on {domain} which has no watcher")]
    MissingWatcher {
        domain: DomainId,
        propagator_id: PropagatorId,
    },
}

/// The constraint store: the domains of the variables and the propagators posted over them.
///
/// A [`State`] is driven to a fixpoint with [`State::stabilize`]. Search never undoes changes to a
/// [`State`]; instead it keeps copies made with [`State::clone_state`] and discards the states it
/// no longer needs. Once a [`State`] has failed it stays failed.
///
/// # Example
/// ```
/// use sapling_core::predicate;
/// use sapling_core::State;
/// use sapling_core::StateStatus;
///
/// let mut state = State::default();
/// let x = state.new_bounded_integer(0, 10);
///
/// let _ = state.post(predicate!(x >= 4));
/// assert_eq!(StateStatus::Stable, state.stabilize());
/// assert_eq!(4, state.lower_bound(x));
///
/// let _ = state.post(predicate!(x <= 3));
/// assert_eq!(StateStatus::Failed, state.stabilize());
/// ```
pub struct State {
    pub(crate) assignments: Assignments,
    watch_list: WatchListCP,
    propagators: PropagatorStore,
    /// Dictates the order in which propagators will be called to propagate.
    propagator_queue: PropagatorQueue,
    failure_counts: SharedFailureCounts,
    failed: bool,
    statistics: StateStatistics,
}

impl Default for State {
    fn default() -> Self {
        State {
            assignments: Assignments::new(StoreId::fresh()),
            watch_list: WatchListCP::default(),
            propagators: PropagatorStore::default(),
            propagator_queue: PropagatorQueue::default(),
            failure_counts: SharedFailureCounts::default(),
            failed: false,
            statistics: StateStatistics::default(),
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("assignments", &self.assignments)
            .field("num_propagators", &self.propagators.num_alive())
            .field("num_enqueued", &self.propagator_queue.len())
            .field("failed", &self.failed)
            .field("statistics", &self.statistics)
            .finish()
    }
}

/// Operations to create variables.
impl State {
    /// Creates a new integer variable with the domain `[lower_bound, upper_bound]`.
    ///
    /// # Panics
    /// If `lower_bound > upper_bound`, or if a bound is not representable.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list.grow();
        domain_id
    }

    /// Creates a new integer variable whose domain consists of exactly the given values.
    ///
    /// # Panics
    /// If `values` is empty, or if a value is not representable.
    pub fn new_sparse_integer(&mut self, values: Vec<i32>) -> DomainId {
        let domain_id = self.assignments.create_new_integer_variable_sparse(values);
        self.watch_list.grow();
        domain_id
    }

    /// Creates a new Boolean (0-1) variable.
    pub fn new_boolean(&mut self) -> DomainId {
        self.new_bounded_integer(0, 1)
    }
}

/// Operations to read the domains.
impl State {
    pub fn lower_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.upper_bound(&self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, variable: Var, value: i32) -> bool {
        variable.contains(&self.assignments, value)
    }

    pub fn size<Var: IntegerVariable>(&self, variable: Var) -> usize {
        variable.size(&self.assignments)
    }

    /// Returns the value of the variable if it is fixed, and [`None`] otherwise.
    pub fn fixed_value<Var: IntegerVariable>(&self, variable: Var) -> Option<i32> {
        let lower_bound = self.lower_bound(variable.clone());
        (lower_bound == self.upper_bound(variable)).then_some(lower_bound)
    }

    pub fn is_fixed<Var: IntegerVariable>(&self, variable: Var) -> bool {
        self.fixed_value(variable).is_some()
    }

    /// Whether every domain of the state is fixed.
    pub fn all_fixed(&self) -> bool {
        self.assignments
            .domains()
            .all(|domain_id| self.assignments.is_domain_fixed(domain_id))
    }

    pub fn num_domains(&self) -> usize {
        self.assignments.num_domains()
    }

    pub fn domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.assignments.domains()
    }

    /// Whether the [`Predicate`] is implied by the current domains.
    pub fn truth_value(&self, predicate: Predicate) -> bool {
        self.assignments.does_predicate_hold(predicate)
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// The number of watchers on the domain of `variable`.
    ///
    /// The degree grows when propagators subscribe and shrinks when they are subsumed or cancel
    /// their subscriptions.
    pub fn degree<Var: IntegerVariable>(&self, variable: Var) -> usize {
        self.watch_list.degree(variable.domain_id())
    }

    /// The sum of the accumulated failure counts of the propagators watching the domain of
    /// `variable`, counted once per watcher.
    pub fn accumulated_failure_count<Var: IntegerVariable>(&self, variable: Var) -> u64 {
        self.watch_list
            .get_watchers(variable.domain_id())
            .iter()
            .filter_map(|watcher| self.propagators.get(watcher.propagator_id))
            .map(|slot| self.failure_counts.get(slot.failure_record))
            .sum()
    }
}

/// Operations for propagators.
impl State {
    /// Add a new propagator to the [`State`]. The constructor for that propagator should
    /// subscribe to the appropriate domain events so that the propagator is called when
    /// necessary.
    ///
    /// While the propagator is added to the queue for propagation, this function does _not_
    /// trigger a round of propagation. An explicit call to [`State::stabilize`] is necessary to
    /// run the new propagator for the first time.
    ///
    /// # Panics
    /// If the constructor subscribes to a variable of another store.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = self.propagators.next_id();
        let mut subscriptions = Vec::new();

        let propagator = constructor.create(PropagatorConstructorContext::new(
            &self.assignments,
            &mut self.watch_list,
            &mut subscriptions,
            propagator_id,
        ));
        let class = propagator.cost().class();
        sapling_assert_simple!(class < PropagatorCost::NUM_CLASSES);

        trace!(
            "Adding propagator {} as {propagator_id} with {} subscriptions",
            propagator.name(),
            subscriptions.len()
        );

        let pushed_id = self.propagators.push(PropagatorSlot {
            propagator: Box::new(propagator),
            subscriptions,
            pending_deltas: Vec::new(),
            woken: true,
            class,
            failure_record: self.failure_counts.register(),
        });
        sapling_assert_simple!(pushed_id == propagator_id);

        if !self.failed {
            self.propagator_queue
                .enqueue_propagator(propagator_id, class);
        }

        PropagatorHandle::new(propagator_id)
    }

    /// Get a reference to the propagator identified by the given handle.
    ///
    /// Returns [`None`] once the propagator has been subsumed.
    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators
            .get(handle.propagator_id())
            .and_then(|slot| slot.propagator.downcast_ref::<P>())
    }

    /// Whether the propagator has not been subsumed.
    pub fn is_propagator_alive(&self, propagator_id: PropagatorId) -> bool {
        self.propagators.get(propagator_id).is_some()
    }

    /// The accumulated failure count of a single propagator.
    pub fn propagator_failure_count(&self, propagator_id: PropagatorId) -> u64 {
        self.propagators
            .get(propagator_id)
            .map(|slot| self.failure_counts.get(slot.failure_record))
            .unwrap_or_default()
    }

    /// The number of propagators which have not been subsumed.
    pub fn num_propagators(&self) -> usize {
        self.propagators.num_alive()
    }

    /// The number of calls to [`Propagator::propagate`] made by this state.
    pub fn propagation_count(&self) -> u64 {
        self.statistics.num_propagations
    }

    pub fn statistics(&self) -> StateStatistics {
        self.statistics
    }

    /// Sets the order in which propagators of the same cost class are run.
    pub fn set_agenda_order(&mut self, order: AgendaOrder) {
        self.propagator_queue.set_order(order);
    }
}

/// Operations for modifying the state.
impl State {
    /// Apply a [`Predicate`] to the [`State`].
    ///
    /// Returns the [`ModEvent`] of the change, which is [`ModEvent::None`] if the [`Predicate`]
    /// was already true. If a domain becomes empty due to this operation the state fails and an
    /// [`EmptyDomain`] error is returned; posting into a failed state does nothing and returns the
    /// same error.
    ///
    /// This method does _not_ perform any propagation. For that, an explicit call to
    /// [`State::stabilize`] is required. This allows posting multiple predicates before the
    /// propagators are invoked.
    pub fn post(&mut self, predicate: Predicate) -> Result<ModEvent, EmptyDomain> {
        if self.failed {
            return Err(EmptyDomain);
        }

        let result = self.assignments.post_predicate(predicate);
        if result.is_err() {
            self.fail(None);
        }
        result
    }

    /// Post the given alternative of `choice` and run the propagators to their fixpoint.
    pub fn commit(&mut self, choice: &Choice, alternative: usize) -> StateStatus {
        let _ = self.post(choice.alternative(alternative));
        self.stabilize()
    }

    /// Run the propagators until none of them can prune further, or until one of them fails.
    ///
    /// Calling this again without modifying the state in between changes nothing.
    pub fn stabilize(&mut self) -> StateStatus {
        if self.failed {
            return StateStatus::Failed;
        }

        // The initial domain events are due to the predicates posted since the previous call.
        self.notify_watchers(None);

        while let Some(propagator_id) = self.propagator_queue.pop() {
            if let Err(inconsistency) = self.run_propagator(propagator_id) {
                trace!("{propagator_id} failed: {inconsistency:?}");
                self.fail(Some(propagator_id));
                return StateStatus::Failed;
            }
        }

        sapling_assert_moderate!(!self.assignments.has_pending_updates());
        sapling_assert_extreme!(self.audit_subscriptions().is_ok());

        StateStatus::Stable
    }

    pub fn status(&self) -> StateStatus {
        if self.failed {
            StateStatus::Failed
        } else {
            StateStatus::Stable
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Whether the state is at its fixpoint, i.e. nothing is scheduled and it has not failed.
    pub fn is_stable(&self) -> bool {
        !self.failed
            && self.propagator_queue.is_empty()
            && !self.assignments.has_pending_updates()
    }

    /// Create an independent copy of the state.
    ///
    /// Domains, propagators and their subscriptions are copied; ids of domains and propagators
    /// are the same in the copy, so variables, handles and choices created for this state can be
    /// used on the copy. When `share` is true, propagators may keep sharing immutable data with
    /// the original (see [`CopyContext::share`]). The accumulated failure counts are always
    /// shared.
    ///
    /// # Panics
    /// If the state has failed or is not stable.
    pub fn clone_state(&self, share: bool) -> State {
        assert!(!self.failed, "A failed state cannot be cloned");
        assert!(
            self.is_stable(),
            "Only a stable state can be cloned, call `State::stabilize` first"
        );

        State {
            assignments: self.assignments.clone(),
            watch_list: self.watch_list.clone(),
            propagators: self.propagators.copy(CopyContext::new(share)),
            propagator_queue: PropagatorQueue::new(
                PropagatorCost::NUM_CLASSES,
                self.propagator_queue.order(),
            ),
            failure_counts: self.failure_counts.share(),
            failed: false,
            statistics: self.statistics,
        }
    }

    /// An estimate of the memory used by the state in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<State>()
            + self.assignments.memory_usage()
            + self.watch_list.memory_usage()
            + self.propagators.memory_usage()
    }

    /// Check that the watch lists contain exactly the subscriptions recorded by the live
    /// propagators.
    pub fn audit_subscriptions(&self) -> Result<(), SubscriptionError> {
        for (domain, watcher) in self.watch_list.iter() {
            let is_recorded = self
                .propagators
                .get(watcher.propagator_id)
                .is_some_and(|slot| {
                    slot.subscriptions.iter().any(|subscription| {
                        subscription.domain.index() == domain.index()
                            && subscription.watcher(watcher.propagator_id) == *watcher
                    })
                });

            if !is_recorded {
                return Err(SubscriptionError::DanglingWatcher {
                    domain,
                    propagator_id: watcher.propagator_id,
                });
            }
        }

        for (propagator_id, slot) in self.propagators.iter() {
            for subscription in &slot.subscriptions {
                let expected = subscription.watcher(propagator_id);
                let has_watcher = subscription.domain.index() < self.watch_list.num_domains()
                    && self
                        .watch_list
                        .get_watchers(subscription.domain)
                        .contains(&expected);

                if !has_watcher {
                    return Err(SubscriptionError::MissingWatcher {
                        domain: subscription.domain,
                        propagator_id,
                    });
                }
            }
        }

        let num_watchers = self.watch_list.iter().count();
        let num_subscriptions: usize = self
            .propagators
            .iter()
            .map(|(_, slot)| slot.subscriptions.len())
            .sum();
        sapling_assert_moderate!(num_watchers == num_subscriptions);

        Ok(())
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        statistic_logger
            .attach_to_prefix("variables")
            .log_statistic(self.assignments.num_domains());
        statistic_logger
            .attach_to_prefix("propagators")
            .log_statistic(self.propagators.num_alive());
        self.statistics.log(statistic_logger.clone());

        for (propagator_id, slot) in self.propagators.iter() {
            slot.propagator.log_statistics(
                statistic_logger
                    .attach_to_prefix(slot.propagator.name())
                    .attach_to_prefix(propagator_id.index()),
            );
        }
    }
}

/// The fixpoint loop.
impl State {
    /// Hand the pending domain changes to the advisors of the propagator, and call the propagator
    /// if one of them asks for it or if a subscription woke it.
    fn run_propagator(&mut self, propagator_id: PropagatorId) -> Result<(), Inconsistency> {
        let State {
            assignments,
            watch_list,
            propagators,
            statistics,
            ..
        } = self;

        let Some(slot) = propagators.get_mut(propagator_id) else {
            return Ok(());
        };

        let mut should_propagate = std::mem::take(&mut slot.woken);
        let mut disposed_advisors: Vec<LocalId> = Vec::new();

        for (local_id, delta) in std::mem::take(&mut slot.pending_deltas) {
            if disposed_advisors.contains(&local_id) {
                continue;
            }

            statistics.num_advise_calls += 1;
            let status = slot.propagator.advise(
                AdviseContext::new(assignments, propagator_id),
                local_id,
                delta,
            );

            should_propagate |= status.schedules_propagator();
            if status.disposes_advisor() {
                cancel_subscriptions(
                    &mut slot.subscriptions,
                    watch_list,
                    propagator_id,
                    local_id,
                    WatchKind::Advice,
                );
                disposed_advisors.push(local_id);
            }
        }

        if !should_propagate {
            return Ok(());
        }

        statistics.num_propagations += 1;
        let outcome = slot.propagator.propagate(PropagationContext::new(
            assignments,
            watch_list,
            &mut slot.subscriptions,
            propagator_id,
        ))?;
        slot.class = slot.propagator.cost().class();

        match outcome {
            PropagatorOutcome::Fix => self.notify_watchers(Some((propagator_id, true))),
            PropagatorOutcome::NoFix => self.notify_watchers(Some((propagator_id, false))),
            PropagatorOutcome::Subsumed => {
                self.dispose(propagator_id);
                self.notify_watchers(None);
            }
        }

        Ok(())
    }

    /// Notify the watchers of every domain changed since the last notification.
    ///
    /// `source` is the propagator that made the changes together with whether it reported to be at
    /// its fixpoint. Such a propagator is not rescheduled by its own changes; its advisors still
    /// see them, straight away.
    fn notify_watchers(&mut self, source: Option<(PropagatorId, bool)>) {
        let State {
            assignments,
            watch_list,
            propagators,
            propagator_queue,
            statistics,
            ..
        } = self;

        let mut disposed_advisors = Vec::new();

        for update in assignments.take_updates() {
            for watcher in watch_list.get_watchers(update.domain) {
                if watcher.events.is_disjoint(update.events) {
                    continue;
                }

                let Some(slot) = propagators.get_mut(watcher.propagator_id) else {
                    continue;
                };
                let source_at_fixpoint = source == Some((watcher.propagator_id, true));

                match watcher.kind {
                    WatchKind::Propagation => {
                        if source_at_fixpoint {
                            continue;
                        }
                        slot.woken = true;
                        propagator_queue.enqueue_propagator(watcher.propagator_id, slot.class);
                    }
                    WatchKind::Advice if source_at_fixpoint => {
                        statistics.num_advise_calls += 1;
                        let status = slot.propagator.advise(
                            AdviseContext::new(assignments, watcher.propagator_id),
                            watcher.local_id,
                            update.delta(),
                        );
                        if status.disposes_advisor() {
                            disposed_advisors.push((watcher.propagator_id, watcher.local_id));
                        }
                    }
                    WatchKind::Advice => {
                        slot.pending_deltas.push((watcher.local_id, update.delta()));
                        propagator_queue.enqueue_propagator(watcher.propagator_id, slot.class);
                    }
                }
            }
        }

        for (propagator_id, local_id) in disposed_advisors {
            if let Some(slot) = propagators.get_mut(propagator_id) {
                cancel_subscriptions(
                    &mut slot.subscriptions,
                    watch_list,
                    propagator_id,
                    local_id,
                    WatchKind::Advice,
                );
            }
        }
    }

    /// Remove a subsumed propagator together with all of its watchers.
    fn dispose(&mut self, propagator_id: PropagatorId) {
        let Some(slot) = self.propagators.remove(propagator_id) else {
            return;
        };

        trace!("Disposing of {} ({propagator_id})", slot.propagator.name());

        for subscription in &slot.subscriptions {
            let removed = self
                .watch_list
                .remove(subscription.domain, &subscription.watcher(propagator_id));
            sapling_assert_moderate!(removed, "a subscription without a watcher was recorded");
        }

        self.statistics.num_subsumptions += 1;
    }

    fn fail(&mut self, culprit: Option<PropagatorId>) {
        self.failed = true;
        self.statistics.num_failures += 1;

        self.propagator_queue.clear();
        self.assignments.discard_updates();
        for slot in self.propagators.iter_mut() {
            slot.pending_deltas.clear();
            slot.woken = false;
        }

        if let Some(slot) = culprit.and_then(|propagator_id| self.propagators.get(propagator_id)) {
            self.failure_counts.increment(slot.failure_record);
        }
    }
}

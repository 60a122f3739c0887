use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::propagation::PropagatorCost;
use crate::propagation::PropagatorId;
use crate::sapling_assert_moderate;

/// The order in which propagators of the same cost class leave the agenda.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AgendaOrder {
    /// Propagators run in the order in which they were scheduled.
    #[default]
    Fifo,
    /// The most recently scheduled propagator runs first.
    Lifo,
}

#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    num_enqueued: usize,
    present_classes: BinaryHeap<Reverse<u32>>,
    order: AgendaOrder,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(PropagatorCost::NUM_CLASSES, AgendaOrder::default())
    }
}

impl PropagatorQueue {
    pub(crate) fn new(num_classes: usize, order: AgendaOrder) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_classes],
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            present_classes: BinaryHeap::new(),
            order,
        }
    }

    pub(crate) fn order(&self) -> AgendaOrder {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: AgendaOrder) {
        self.order = order;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.num_enqueued
    }

    /// Schedule the propagator in the given class. A propagator that is already scheduled keeps
    /// its position.
    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, class: usize) {
        sapling_assert_moderate!(class < self.queues.len());

        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.accomodate(propagator_id, false);
        self.is_enqueued[propagator_id] = true;
        self.num_enqueued += 1;

        if self.queues[class].is_empty() {
            self.present_classes.push(Reverse(class as u32));
        }

        match self.order {
            AgendaOrder::Fifo => self.queues[class].push_back(propagator_id),
            AgendaOrder::Lifo => self.queues[class].push_front(propagator_id),
        }
    }

    /// Take the next propagator from the cheapest non-empty class.
    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_class = self.present_classes.peek()?.0 as usize;
        sapling_assert_moderate!(!self.queues[top_class].is_empty());

        let next_propagator_id = self.queues[top_class].pop_front();

        if let Some(propagator_id) = next_propagator_id {
            self.is_enqueued[propagator_id] = false;
            self.num_enqueued -= 1;
        }

        if self.queues[top_class].is_empty() {
            let _ = self.present_classes.pop();
        }

        next_propagator_id
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(class)) = self.present_classes.pop() {
            self.queues[class as usize].clear();
        }

        for is_propagator_enqueued in self.is_enqueued.iter_mut() {
            *is_propagator_enqueued = false;
        }

        self.num_enqueued = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued
            .get(propagator_id)
            .copied()
            .unwrap_or_default()
    }
}

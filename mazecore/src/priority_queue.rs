//! Binary heap with in-place priority updates.
//!
//! There is no secondary index: `contains` and `update_priority` scan the heap and compare
//! values with `PartialEq`. The solvers store grid positions as values, so two cells that
//! share a priority are still told apart.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapKind {
    Min,
    Max,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,
}

#[derive(Debug, Clone)]
struct Node<T, P> {
    priority: P,
    value: T,
}

#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P = u32> {
    nodes: Vec<Node<T, P>>,
    kind: HeapKind,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new(kind: HeapKind) -> Self {
        Self {
            nodes: Vec::new(),
            kind,
        }
    }

    pub fn new_min() -> Self {
        Self::new(HeapKind::Min)
    }

    pub fn new_max() -> Self {
        Self::new(HeapKind::Max)
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn enqueue(&mut self, value: T, priority: P) {
        self.nodes.push(Node { priority, value });
        self.sift_up(self.nodes.len() - 1);
    }

    /// Removes and returns the root.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.nodes.is_empty() {
            return Err(QueueError::Empty);
        }

        let root = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }

        Ok(root.value)
    }

    pub fn peek(&self) -> Result<&T, QueueError> {
        self.nodes
            .first()
            .map(|node| &node.value)
            .ok_or(QueueError::Empty)
    }

    pub fn peek_priority(&self) -> Result<&P, QueueError> {
        self.nodes
            .first()
            .map(|node| &node.priority)
            .ok_or(QueueError::Empty)
    }

    /// Whether `a` belongs above `b` in this heap.
    fn outranks(&self, a: &P, b: &P) -> bool {
        match self.kind {
            HeapKind::Min => a < b,
            HeapKind::Max => a > b,
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.outranks(&self.nodes[i].priority, &self.nodes[parent].priority) {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let (left, right) = (2 * i + 1, 2 * i + 2);
            let mut top = i;

            if left < len && self.outranks(&self.nodes[left].priority, &self.nodes[top].priority) {
                top = left;
            }
            if right < len && self.outranks(&self.nodes[right].priority, &self.nodes[top].priority)
            {
                top = right;
            }

            if top == i {
                break;
            }
            self.nodes.swap(top, i);
            i = top;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.nodes.len()).all(|i| {
            let parent = (i - 1) / 2;
            !self.outranks(&self.nodes[i].priority, &self.nodes[parent].priority)
        })
    }
}

impl<T: PartialEq, P: Ord> PriorityQueue<T, P> {
    pub fn contains(&self, value: &T) -> bool {
        self.position(value).is_some()
    }

    /// Sets a new priority for `value` and restores heap order around it.
    ///
    /// Returns `false` when the value is not queued.
    pub fn update_priority(&mut self, value: &T, priority: P) -> bool {
        let Some(i) = self.position(value) else {
            return false;
        };

        self.nodes[i].priority = priority;
        self.sift_up(i);
        // sift_up may have moved a different node into `i`, or none at all
        if let Some(i) = self.position(value) {
            self.sift_down(i);
        }

        true
    }

    fn position(&self, value: &T) -> Option<usize> {
        self.nodes.iter().position(|node| node.value == *value)
    }
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new_min()
    }
}

//! Persistent, lifetime-aware shape queue.

use std::collections::VecDeque;

use crate::command::QueuedShape;
use crate::config::DebugShapesConfig;

/// Shapes issued through the persistent API.
///
/// Shapes with a positive lifetime live in the timed list until their
/// lifetime runs out. Everything else waits in the single-frame list for the
/// next [`tick`](Self::tick). Both lists are bounded; when one is full the
/// oldest entry is evicted.
#[derive(Debug, Clone)]
pub struct ShapeQueue {
    timed: VecDeque<QueuedShape>,
    single_frame: VecDeque<QueuedShape>,
    max_timed: usize,
    max_single_frame: usize,
}

impl ShapeQueue {
    pub fn new(max_single_frame: usize, max_timed: usize) -> Self {
        Self {
            timed: VecDeque::new(),
            single_frame: VecDeque::new(),
            max_timed,
            max_single_frame,
        }
    }

    pub fn from_config(config: &DebugShapesConfig) -> Self {
        Self::new(config.max_primitives, config.max_primitives_with_lifetime)
    }

    pub fn push(&mut self, shape: QueuedShape) {
        if shape.has_lifetime() {
            push_bounded(&mut self.timed, self.max_timed, shape);
        } else {
            push_bounded(&mut self.single_frame, self.max_single_frame, shape);
        }
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = QueuedShape>) {
        for shape in shapes {
            self.push(shape);
        }
    }

    /// Hand every live shape to `sink`, then age the timed list by `elapsed`.
    ///
    /// Single-frame shapes are consumed. A timed shape is handed over on
    /// every tick that starts with a positive lifetime, and removed once its
    /// lifetime drops to zero or below.
    pub fn tick(&mut self, elapsed: f32, mut sink: impl FnMut(&QueuedShape)) {
        for shape in self.single_frame.drain(..) {
            sink(&shape);
        }
        for shape in &self.timed {
            sink(shape);
        }

        for shape in &mut self.timed {
            shape.lifetime -= elapsed;
        }
        let before = self.timed.len();
        self.timed.retain(QueuedShape::has_lifetime);
        if before != self.timed.len() {
            log::trace!("{} debug shapes expired", before - self.timed.len());
        }
    }

    /// Shapes with a positive lifetime, oldest first.
    pub fn timed(&self) -> impl Iterator<Item = &QueuedShape> {
        self.timed.iter()
    }

    pub fn timed_len(&self) -> usize {
        self.timed.len()
    }

    pub fn single_frame_len(&self) -> usize {
        self.single_frame.len()
    }

    pub fn len(&self) -> usize {
        self.timed.len() + self.single_frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timed.is_empty() && self.single_frame.is_empty()
    }

    pub fn clear(&mut self) {
        self.timed.clear();
        self.single_frame.clear();
    }
}

fn push_bounded(list: &mut VecDeque<QueuedShape>, max: usize, shape: QueuedShape) {
    if max == 0 {
        log::trace!(
            "Debug shape queue has no capacity; dropping {}",
            shape.command.kind().name()
        );
        return;
    }
    while list.len() >= max {
        if let Some(evicted) = list.pop_front() {
            log::trace!(
                "Debug shape queue full; evicting oldest {}",
                evicted.command.kind().name()
            );
        }
    }
    list.push_back(shape);
}

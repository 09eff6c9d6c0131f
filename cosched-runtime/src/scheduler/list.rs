use super::context::Control;
use crate::error::{Result, SchedulerError};
use crate::task::{TaskFn, TaskId, TaskState, Ticks};

/// Task control block
#[derive(Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) function: TaskFn,
    pub(crate) state: TaskState,
    pub(crate) period: Ticks,
    pub(crate) name: Option<&'static str>,
}

impl Entry {
    pub(crate) fn new(function: TaskFn, delay: Ticks, period: Ticks) -> Self {
        Self {
            function,
            state: TaskState::delayed(delay),
            period,
            name: None,
        }
    }
}

/// Storage cell. Occupied slots are linked through `prev`/`next` in
/// registration order; vacant slots chain through `next` as the free list.
#[derive(Clone, Copy)]
struct Slot {
    entry: Option<Entry>,
    generation: u32,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Result of walking the list into a fixed buffer.
pub(crate) struct Snapshot {
    pub(crate) len: usize,
    /// Slot index where the walk hit a vacant slot or looped past capacity.
    pub(crate) broken_at: Option<usize>,
}

/// Doubly-linked task list over a fixed arena of `N` slots.
///
/// Add at tail and remove from anywhere are O(1) and never allocate.
pub(crate) struct TaskList<const N: usize> {
    slots: [Slot; N],
    first: Option<usize>,
    last: Option<usize>,
    free: Option<usize>,
    len: usize,
    /// Task whose callback is running, if any.
    current: Option<TaskId>,
    /// Set when a running callback changes a task other than itself.
    touched: bool,
}

impl<const N: usize> TaskList<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: std::array::from_fn(|i| Slot {
                entry: None,
                generation: 0,
                prev: None,
                next: (i + 1 < N).then_some(i + 1),
            }),
            first: None,
            last: None,
            free: (N > 0).then_some(0),
            len: 0,
            current: None,
            touched: false,
        }
    }

    /// Drop every task. Outstanding handles stop resolving.
    pub(crate) fn reset(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.prev = None;
            slot.next = (i + 1 < N).then_some(i + 1);
        }
        self.first = None;
        self.last = None;
        self.free = (N > 0).then_some(0);
        self.len = 0;
        self.current = None;
        self.touched = false;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn resolve(&self, id: TaskId) -> Option<usize> {
        let slot = self.slots.get(id.index)?;
        (slot.generation == id.generation && slot.entry.is_some()).then_some(id.index)
    }

    pub(crate) fn get(&self, id: TaskId) -> Option<&Entry> {
        self.resolve(id).and_then(|i| self.slots[i].entry.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Entry> {
        self.resolve(id).and_then(|i| self.slots[i].entry.as_mut())
    }

    pub(crate) fn set_current(&mut self, id: Option<TaskId>) {
        self.current = id;
    }

    pub(crate) fn touched(&self) -> bool {
        self.touched
    }

    pub(crate) fn clear_touched(&mut self) {
        self.touched = false;
    }

    /// Record a change to `id` made from inside a callback.
    fn touch(&mut self, id: Option<TaskId>) {
        if self.current.is_some() && self.current != id {
            self.touched = true;
        }
    }

    /// Copy the traversal order into `order`.
    pub(crate) fn snapshot(&self, order: &mut [Option<TaskId>; N]) -> Snapshot {
        let mut len = 0;
        let mut cursor = self.first;
        while let Some(index) = cursor {
            let slot = &self.slots[index];
            if slot.entry.is_none() || len == N {
                return Snapshot {
                    len,
                    broken_at: Some(index),
                };
            }
            order[len] = Some(TaskId {
                index,
                generation: slot.generation,
            });
            len += 1;
            cursor = slot.next;
        }
        Snapshot {
            len,
            broken_at: None,
        }
    }

    /// Live tasks in registration order.
    pub(crate) fn iter(&self) -> Iter<'_, N> {
        Iter {
            list: self,
            cursor: self.first,
            seen: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn vacate_without_unlinking(&mut self, id: TaskId) {
        self.slots[id.index].entry = None;
    }
}

impl<const N: usize> Control for TaskList<N> {
    fn insert(&mut self, entry: Entry) -> Result<TaskId> {
        let index = self
            .free
            .ok_or(SchedulerError::CapacityExhausted { capacity: N })?;
        let last = self.last;

        let slot = &mut self.slots[index];
        self.free = slot.next;
        slot.entry = Some(entry);
        slot.prev = last;
        slot.next = None;
        let id = TaskId {
            index,
            generation: slot.generation,
        };

        match last {
            Some(last) => self.slots[last].next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
        self.len += 1;
        self.touch(None);
        Ok(id)
    }

    fn remove(&mut self, id: TaskId) -> bool {
        let Some(index) = self.resolve(id) else {
            return false;
        };
        let Slot { prev, next, .. } = self.slots[index];

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.last = prev,
        }

        let slot = &mut self.slots[index];
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        slot.prev = None;
        slot.next = self.free;
        self.free = Some(index);
        self.len -= 1;
        self.touch(Some(id));
        true
    }

    fn state(&self, id: TaskId) -> Option<TaskState> {
        self.get(id).map(|entry| entry.state)
    }

    fn set_state(&mut self, id: TaskId, state: TaskState) -> Result<()> {
        let entry = self.get_mut(id).ok_or(SchedulerError::InvalidTask(id))?;
        entry.state = state;
        self.touch(Some(id));
        Ok(())
    }

    fn set_period(&mut self, id: TaskId, period: Ticks) -> Result<()> {
        let entry = self.get_mut(id).ok_or(SchedulerError::InvalidTask(id))?;
        entry.period = period;
        Ok(())
    }
}

pub(crate) struct Iter<'a, const N: usize> {
    list: &'a TaskList<N>,
    cursor: Option<usize>,
    seen: usize,
}

impl<'a, const N: usize> Iterator for Iter<'a, N> {
    type Item = (TaskId, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.list.slots[index];
        let entry = slot.entry.as_ref().filter(|_| self.seen < N)?;
        self.seen += 1;
        self.cursor = slot.next;
        Some((
            TaskId {
                index,
                generation: slot.generation,
            },
            entry,
        ))
    }
}

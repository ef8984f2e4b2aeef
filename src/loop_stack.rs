use crate::error::EngineError;

/// Usable loop-nesting depth when none is configured.
pub const DEFAULT_LOOP_CAPACITY: usize = 98;

/// Bounded stack of loop return addresses.
///
/// Each entered loop pushes the pc just past its `[`. Pushing past
/// `capacity` is an error rather than a silent drop.
#[derive(Debug, Clone)]
pub struct LoopStack {
    frames: Vec<usize>,
    capacity: usize,
}

impl LoopStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity.min(DEFAULT_LOOP_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, pc: usize) -> Result<(), EngineError> {
        if self.frames.len() >= self.capacity {
            return Err(EngineError::LoopDepthExceeded {
                capacity: self.capacity,
                pc,
            });
        }
        self.frames.push(pc);
        Ok(())
    }

    #[inline(always)]
    pub fn top(&self) -> Option<usize> {
        self.frames.last().copied()
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<usize> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LoopStack {
    fn default() -> Self {
        Self::new(DEFAULT_LOOP_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_top_pop() {
        let mut stack = LoopStack::new(4);
        stack.push(3).unwrap();
        stack.push(8).unwrap();
        assert_eq!(stack.top(), Some(8));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Some(8));
        assert_eq!(stack.top(), Some(3));
    }

    #[test]
    fn test_empty_stack() {
        let mut stack = LoopStack::default();
        assert_eq!(stack.capacity(), DEFAULT_LOOP_CAPACITY);
        assert_eq!(stack.top(), None);
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_fills_to_capacity_then_fails() {
        let mut stack = LoopStack::new(3);
        for pc in 0..3 {
            stack.push(pc).unwrap();
        }
        let err = stack.push(99).unwrap_err();
        assert!(matches!(
            err,
            EngineError::LoopDepthExceeded { capacity: 3, pc: 99 }
        ));
        // Failed push leaves the stack untouched.
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.top(), Some(2));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut stack = LoopStack::new(usize::MAX);
        stack.push(1).unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.capacity(), usize::MAX);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut stack = LoopStack::new(0);
        assert!(stack.push(0).is_err());
    }
}

//! Model checks driving a queue and a `VecDeque` through the same
//! operation sequences and comparing every observable step.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use cirq::{CircularQueue, DestroyFn, PushError, QueueFlags};
use proptest::prelude::*;

const CAP: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Op {
    Push(i32),
    Pop,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![any::<i32>().prop_map(Op::Push), Just(Op::Pop)],
        0..256,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fixed_queue_matches_vecdeque(ops in ops()) {
        let mut q = CircularQueue::new(CAP, None, QueueFlags::empty()).unwrap();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    if model.len() < CAP {
                        prop_assert_eq!(q.push(v), Ok(()));
                        model.push_back(v);
                    } else {
                        prop_assert_eq!(q.push(v), Err(PushError::Full(v)));
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(q.pop(), model.pop_front());
                }
            }
            prop_assert_eq!(q.len(), model.len());
            prop_assert_eq!(q.is_empty(), model.is_empty());
            let seen: Vec<i32> = q.iter().copied().collect();
            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(seen, expected);
        }

        while let Some(expected) = model.pop_front() {
            prop_assert_eq!(q.pop(), Some(expected));
        }
        prop_assert_eq!(q.pop(), None);
    }

    #[test]
    fn prop_overwrite_queue_matches_bounded_model(ops in ops()) {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&destroyed);
        let hook: DestroyFn<i32> = Box::new(move |item| recorder.borrow_mut().push(item));
        let mut q = CircularQueue::new(CAP, Some(hook), QueueFlags::OVERWRITE).unwrap();

        let mut model: VecDeque<i32> = VecDeque::new();
        let mut evicted: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    if model.len() == CAP {
                        evicted.push(model.pop_front().unwrap());
                    }
                    prop_assert_eq!(q.push(v), Ok(()));
                    model.push_back(v);
                }
                Op::Pop => {
                    prop_assert_eq!(q.pop(), model.pop_front());
                }
            }
            prop_assert_eq!(q.len(), model.len());
        }

        prop_assert_eq!(&*destroyed.borrow(), &evicted);
        while let Some(expected) = model.pop_front() {
            prop_assert_eq!(q.pop(), Some(expected));
        }
        prop_assert_eq!(q.pop(), None);
    }

    #[test]
    fn prop_growable_queue_keeps_everything(values in prop::collection::vec(any::<i32>(), 0..512)) {
        let mut q = CircularQueue::new(0, None, QueueFlags::empty()).unwrap();
        for &v in &values {
            prop_assert_eq!(q.push(v), Ok(()));
        }

        prop_assert_eq!(q.len(), values.len());
        let chunk = CircularQueue::<i32>::GROWTH_CHUNK;
        let expected_capacity = if values.is_empty() {
            chunk
        } else {
            chunk * values.len().div_ceil(chunk)
        };
        prop_assert_eq!(q.capacity(), expected_capacity);

        for &expected in &values {
            prop_assert_eq!(q.pop(), Some(expected));
        }
        prop_assert_eq!(q.pop(), None);
    }
}

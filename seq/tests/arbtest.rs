use std::collections::VecDeque;

use arbitrary::Unstructured;
use arbtest::{arbitrary, arbtest};
use mahler_seq::{Enumerable, HashSet, Indexed, Iterable, Queue, Sequence};

#[derive(arbitrary::Arbitrary, Debug)]
enum QueueOp {
    Enqueue(u32),
    Dequeue,
    Peek,
    SetData(Vec<u32>),
    Remove(u32),
}

impl QueueOp {
    fn apply_to_model(&self, model: &mut VecDeque<u32>) -> Option<u32> {
        match self {
            QueueOp::Enqueue(x) => {
                model.push_back(*x);
                None
            }
            QueueOp::Dequeue => model.pop_front(),
            QueueOp::Peek => model.front().copied(),
            QueueOp::SetData(xs) => {
                *model = xs.iter().copied().collect();
                None
            }
            QueueOp::Remove(x) => {
                model.retain(|y| y != x);
                None
            }
        }
    }

    fn apply_to_queue(&self, queue: &mut Queue<u32>) -> Option<u32> {
        match self {
            QueueOp::Enqueue(x) => {
                queue.enqueue(*x);
                None
            }
            QueueOp::Dequeue => queue.dequeue(),
            QueueOp::Peek => queue.peek().copied(),
            QueueOp::SetData(xs) => {
                queue.set_data(xs.clone());
                None
            }
            QueueOp::Remove(x) => {
                queue.remove(x);
                None
            }
        }
    }
}

#[derive(arbitrary::Arbitrary, Debug)]
enum SetOp {
    Add(u8),
    Remove(u8),
    AddRange(Vec<u8>),
}

// u.arbitrary() generates very short vecs by default:
// https://github.com/matklad/arbtest/issues/8
fn arb_vec(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<u32>> {
    let len = u.arbitrary_len::<u32>()?;
    std::iter::from_fn(|| Some(u.arbitrary::<u32>()))
        .take(len)
        .collect()
}

#[test]
fn queue_matches_vecdeque() {
    arbtest(|u| {
        let mut model = VecDeque::new();
        let mut queue = Queue::new();
        let ops: Vec<QueueOp> = u.arbitrary()?;

        for op in ops {
            assert_eq!(op.apply_to_model(&mut model), op.apply_to_queue(&mut queue));

            queue.check_invariants();
            assert_eq!(queue.count(), model.len());
            assert_eq!(queue.to_vec(), model.iter().copied().collect::<Vec<_>>());
        }

        Ok(())
    });
}

#[test]
fn set_matches_first_write_wins_model() {
    arbtest(|u| {
        // The model keeps, per pitch class, the first note that was added.
        let mut model: Vec<Option<u8>> = vec![None; 12];
        let mut set = HashSet::with_selector(|code: &u8| code % 12);
        let ops: Vec<SetOp> = u.arbitrary()?;

        for op in ops {
            match op {
                SetOp::Add(x) => {
                    let slot = &mut model[usize::from(x % 12)];
                    let fresh = slot.is_none();
                    if fresh {
                        *slot = Some(x);
                    }
                    assert_eq!(set.add(x), fresh);
                }
                SetOp::Remove(x) => {
                    let removed = model[usize::from(x % 12)].take();
                    assert_eq!(set.remove(&x), removed);
                }
                SetOp::AddRange(xs) => {
                    for &x in &xs {
                        let slot = &mut model[usize::from(x % 12)];
                        if slot.is_none() {
                            *slot = Some(x);
                        }
                    }
                    set.add_range(xs);
                }
            }

            let mut expected: Vec<u8> = model.iter().flatten().copied().collect();
            let mut actual = set.to_vec();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected);
            assert_eq!(set.len(), expected.len());
        }

        Ok(())
    });
}

#[test]
fn take_is_a_prefix() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let n = u.int_in_range(0..=vec.len())?;
        let seq = Enumerable::from(vec.clone());

        assert_eq!(seq.iter().take(n).to_vec(), &vec[..n]);

        Ok(())
    });
}

#[test]
fn skip_then_take_is_a_slice() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let k = u.int_in_range(0..=vec.len() + 2)?;
        let m = u.int_in_range(0..=vec.len() + 2)?;
        let start = k.min(vec.len());
        let end = (k + m).min(vec.len());

        assert_eq!(Iterable::of(vec.clone()).skip(k).to_vec(), &vec[start..]);
        assert_eq!(Iterable::of(vec.clone()).skip(k).take(m).to_vec(), &vec[start..end]);
        let kept = vec.len().saturating_sub(k);
        assert_eq!(Iterable::of(vec.clone()).skip_last(k).to_vec(), &vec[..kept]);

        Ok(())
    });
}

#[test]
fn filter_then_map_matches_std() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let modulus = u.int_in_range(1..=7u32)?;

        let expected: Vec<u64> = vec
            .iter()
            .filter(|&&x| x % modulus == 0)
            .map(|&x| u64::from(x) * 3)
            .collect();
        let actual = Iterable::of(vec)
            .filter(|x| x % modulus == 0)
            .map(|x| u64::from(x) * 3)
            .to_vec();
        assert_eq!(actual, expected);

        Ok(())
    });
}

#[test]
fn while_operations_match_std() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let bound: u32 = u.arbitrary()?;

        let taken: Vec<u32> = vec.iter().copied().take_while(|&x| x < bound).collect();
        let skipped: Vec<u32> = vec.iter().copied().skip_while(|&x| x < bound).collect();
        assert_eq!(Iterable::of(vec.clone()).take_while(|&x| x < bound).to_vec(), taken);
        assert_eq!(Iterable::of(vec).skip_while(|&x| x < bound).to_vec(), skipped);

        Ok(())
    });
}

#[test]
fn enumerable_remove_matches_retain() {
    arbtest(|u| {
        let mut vec: Vec<u8> = u.arbitrary()?;
        let target: u8 = u.arbitrary()?;
        let mut seq = Enumerable::from(vec.clone());

        vec.retain(|&x| x != target);
        seq.remove(&target);
        assert_eq!(seq.data(), &vec[..]);
        assert_eq!(seq.first_index(|&x| x == target), None);

        Ok(())
    });
}

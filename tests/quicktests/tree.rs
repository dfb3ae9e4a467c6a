use bst::{Error, Tree};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and to a sorted list of every inserted key. Duplicate
/// keys are separate nodes, so removing a key takes out exactly one copy of it.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, keys: &mut Vec<K>)
where
    K: Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                let at = keys.partition_point(|x| x <= k);
                keys.insert(at, k.clone());
            }
            Op::Remove(k) => {
                let removed = bst.remove(k).is_some();
                match keys.binary_search(k) {
                    Ok(at) => {
                        assert!(removed);
                        keys.remove(at);
                    }
                    Err(_) => assert!(!removed),
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut keys = Vec::new();

    do_ops(&ops, &mut tree, &mut keys);
    tree.len() == keys.len() && tree.iter().map(|(k, _)| *k).eq(keys.iter().copied())
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<(i16, u8)>) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();

    keys.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn find_returns_fresh_insert(xs: Vec<i8>, key: i8, value: u32) -> bool {
    let mut tree = Tree::new();
    for x in xs.iter().filter(|x| **x != key) {
        tree.insert(*x, 0);
    }
    tree.insert(key, value);

    tree.find(&key) == Ok(&value)
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::NotFound))
}

#[quickcheck]
fn removal_takes_one_copy(xs: Vec<i8>, key: i8) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, ());
    }
    let copies = |tree: &Tree<i8, ()>| tree.iter().filter(|(k, _)| **k == key).count();

    let before = copies(&tree);
    let removed = tree.remove(&key).is_some();
    let after = copies(&tree);

    if before == 0 {
        !removed && after == 0 && tree.len() == xs.len()
    } else {
        removed && after == before - 1 && tree.len() == xs.len() - 1
    }
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    let mut still_present = xs;
    for delete in &deletes {
        let removed = tree.remove(delete);
        // Each removal takes out a single node, even when a key was inserted several times.
        match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                if removed != Some(*delete) {
                    return false;
                }
            }
            None => {
                if removed.is_some() {
                    return false;
                }
            }
        }
    }

    tree.len() == still_present.len() && still_present.iter().all(|x| tree.find(x).is_ok())
}

#[quickcheck]
fn removing_everything_empties_the_tree(xs: Vec<i8>, order: Vec<usize>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    let mut remaining = xs;
    let mut choices = order.into_iter();
    while !remaining.is_empty() {
        let at = choices.next().unwrap_or(0) % remaining.len();
        let key = remaining.swap_remove(at);
        if tree.remove(&key).is_none() {
            return false;
        }
    }

    tree.is_empty() && tree.len() == 0 && tree.height() == 0
}

#[quickcheck]
fn clear_empties_the_tree(xs: Vec<(i8, i8)>) -> bool {
    let mut tree: Tree<_, _> = xs.into_iter().collect();
    tree.clear();
    let once = tree.is_empty() && tree.len() == 0;
    tree.clear();

    once && tree.is_empty() && tree.iter().next().is_none()
}

#[test]
fn ops_shrink_towards_smaller_keys() {
    use quickcheck::Arbitrary;

    let shrunk: Vec<_> = Op::<i8, i8>::Remove(10).shrink().collect();
    assert!(!shrunk.is_empty());
    assert!(shrunk
        .iter()
        .all(|op| matches!(op, Op::Remove(k) if k.unsigned_abs() < 10)));

    let shrunk: Vec<_> = Op::Insert(4i8, 7i8).shrink().collect();
    assert!(!shrunk.is_empty());
    assert!(shrunk.iter().all(|op| matches!(op, Op::Insert(_, 7))));
}

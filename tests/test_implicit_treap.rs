use implicit_treap::treap::{Error, ImplicitTreap};
use rand::Rng;

const NUM_OF_OPERATIONS: usize = 20_000;

fn model_sum(values: &[i64]) -> i64 {
    values.iter().sum()
}

#[test]
fn int_test_reference_scenario() {
    let mut treap = ImplicitTreap::new();
    for (index, value) in [5, 24, 42, 13, 99, 2, 17].iter().enumerate() {
        treap.insert(index, *value).unwrap();
    }

    let mut right = treap.split_off(2).unwrap();
    assert_eq!(treap.sum(), 29);
    assert_eq!(right.sum(), 173);
    treap.append(&mut right);
    assert_eq!(treap.sum(), 202);

    treap.insert(4, 30).unwrap();
    assert_eq!(treap.range_sum(0, 7), Ok(232));
    treap.erase(4, 1).unwrap();
    assert_eq!(treap.range_sum(0, 6), Ok(202));
    treap.erase(4, 2).unwrap();
    assert_eq!(treap.range_sum(0, 4), Ok(101));
    assert_eq!(treap.into_iter().collect::<Vec<i64>>(), vec![5, 24, 42, 13, 17]);
}

#[test]
fn int_test_order_preservation() {
    let mut treap = ImplicitTreap::with_seed(11);
    for i in 0..NUM_OF_OPERATIONS {
        treap.insert(i, i as i64).unwrap();
    }
    assert_eq!(
        treap.iter().cloned().collect::<Vec<i64>>(),
        (0..NUM_OF_OPERATIONS as i64).collect::<Vec<i64>>(),
    );
}

#[test]
fn int_test_random_operations() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut treap = ImplicitTreap::with_seed(1);
    let mut expected: Vec<i64> = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        match rng.gen_range(0, 4) {
            0 | 1 => {
                let index = rng.gen_range(0, expected.len() + 1);
                let value = rng.gen_range(-1_000_000, 1_000_000);
                treap.insert(index, value).unwrap();
                expected.insert(index, value);
            },
            2 if !expected.is_empty() => {
                let index = rng.gen_range(0, expected.len());
                let count = rng.gen_range(1, expected.len() - index + 1).min(8);
                treap.erase(index, count).unwrap();
                expected.drain(index..index + count);
            },
            _ if !expected.is_empty() => {
                let from = rng.gen_range(0, expected.len());
                let to = rng.gen_range(from, expected.len());
                assert_eq!(treap.range_sum(from, to), Ok(model_sum(&expected[from..=to])));
            },
            _ => {},
        }
        assert_eq!(treap.len(), expected.len());
    }

    assert_eq!(treap.sum(), model_sum(&expected));
    if !expected.is_empty() {
        assert_eq!(treap.range_sum(0, expected.len() - 1), Ok(model_sum(&expected)));
    }
    assert_eq!(
        treap.iter().collect::<Vec<&i64>>(),
        expected.iter().collect::<Vec<&i64>>(),
    );
}

#[test]
fn int_test_split_off_round_trip() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let values: Vec<i64> = (0..200).map(|_| rng.gen_range(-100, 100)).collect();
    let mut treap: ImplicitTreap<i64> = values.iter().cloned().collect();

    for at in 0..=values.len() {
        let mut right = treap.split_off(at).unwrap();
        assert_eq!(treap.len(), at);
        assert_eq!(right.len(), values.len() - at);
        assert_eq!(treap.sum(), model_sum(&values[..at]));
        assert_eq!(right.sum(), model_sum(&values[at..]));
        treap.append(&mut right);
        assert_eq!(treap.iter().cloned().collect::<Vec<i64>>(), values);
    }
}

#[test]
fn int_test_failed_operations_leave_tree_unchanged() {
    let mut treap: ImplicitTreap<i64> = (1..=10).collect();
    let before = treap.iter().cloned().collect::<Vec<i64>>();

    assert_eq!(treap.insert(11, 0), Err(Error::InvalidPosition { position: 11, len: 10 }));
    assert_eq!(treap.erase(3, 0), Err(Error::InvalidCount));
    assert_eq!(treap.erase(10, 1), Err(Error::InvalidPosition { position: 10, len: 10 }));
    assert_eq!(treap.erase(8, 3), Err(Error::InvalidRange { from: 8, to: 10, len: 10 }));
    assert_eq!(treap.range_sum(5, 4), Err(Error::InvalidRange { from: 5, to: 4, len: 10 }));
    assert_eq!(treap.range_sum(5, 10), Err(Error::InvalidRange { from: 5, to: 10, len: 10 }));
    assert_eq!(treap.range_sum(10, 10), Err(Error::InvalidPosition { position: 10, len: 10 }));
    assert!(treap.split_off(11).is_err());

    assert_eq!(treap.iter().cloned().collect::<Vec<i64>>(), before);
    assert_eq!(treap.sum(), 55);
}

#[test]
fn int_test_large_tree_drop() {
    let mut treap = ImplicitTreap::with_seed(5);
    for i in 0..200_000 {
        treap.push_back(i as u64);
    }
    assert_eq!(treap.sum(), 199_999 * 200_000 / 2);
    treap.erase(1000, 150_000).unwrap();
    assert_eq!(treap.len(), 50_000);
}

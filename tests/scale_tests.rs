use keysort::prelude::*;
use keysort::tokenize;
use rand::Rng;
use std::cmp::Ordering;
use std::time::Instant;

/// Reference natural comparison on `file-<n>-<m>.txt` names.
fn parts(name: &str) -> (u64, u64) {
    let mut nums = name
        .trim_start_matches("file-")
        .trim_end_matches(".txt")
        .split('-')
        .map(|n| n.parse::<u64>().unwrap());
    (nums.next().unwrap(), nums.next().unwrap())
}

#[test]
fn test_sort_100k_natural() {
    let count = 100_000;
    println!("Generating {} file names...", count);

    let mut rng = rand::rng();
    let mut input: Vec<String> = (0..count)
        .map(|_| {
            format!(
                "file-{}-{}.txt",
                rng.random_range(0..1_000_000u64),
                rng.random_range(0..100u64)
            )
        })
        .collect();

    println!("Sorting {} names...", count);
    let start = Instant::now();
    Sorter::new().natural().sort(&mut input).unwrap();
    println!("Sorted in {:?}", start.elapsed());

    assert_eq!(input.len(), count);
    for i in 0..count - 1 {
        assert_ne!(
            parts(&input[i]).cmp(&parts(&input[i + 1])),
            Ordering::Greater,
            "Sort failed at index {}",
            i
        );
    }
}

#[test]
fn test_tokenize_long_input() {
    let s = "a1".repeat(50_000);
    assert_eq!(tokenize(&s).count(), 100_000);
    let joined: String = tokenize(&s).map(|t| t.as_str()).collect();
    assert_eq!(joined, s);
}

#[test]
#[ignore]
fn test_sort_10m_by_value() {
    // WARNING: holds the data, its keys and the permutation at once (several GB).
    let count = 10_000_000;
    let mut rng = rand::rng();
    let mut input: Vec<u64> = (0..count).map(|_| rng.random()).collect();

    let start = Instant::now();
    Sorter::new().ordered().sort(&mut input).unwrap();
    println!("Sorted 10M integers in {:?}", start.elapsed());

    assert!(input.windows(2).all(|w| w[0] <= w[1]));
}

use rand::SeedableRng;
use rand::rngs::SmallRng;
use skiplist::{Ascending, SkipList};

/// main
fn main() -> Result<(), skiplist::Error> {
    // skip list
    let nums: [i64; 10] = [3, 1, 9, 12, 11, 16, 99, 18, 7, 22];

    let mut skip_list = SkipList::new(Ascending)?;
    skip_list.set_rand_source(SmallRng::seed_from_u64(2025));
    for n in &nums {
        skip_list.set(*n, n * n);
    }

    println!("SkipList");
    println!("");
    println!("{}", skip_list);
    println!("");
    println!("  contains 3? {}", skip_list.contains_key(&3));
    println!("  contains 4? {}", skip_list.contains_key(&4));
    println!("  3 squared: {}", skip_list.value_of(&3)?);
    println!(
        "  first key >= 13: {:?}",
        skip_list.find(&13).map(|node| *node.key())
    );

    skip_list.remove(&99);
    skip_list.set_max_level(2)?;
    println!("");
    println!("  without 99, max level 2:");
    println!("{}", skip_list);
    println!("");

    Ok(())
}

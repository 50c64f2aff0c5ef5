// Built-in sample data loaded at startup and on reset

use super::item::{HeapItem, ItemFactory};

/// First person id available to ad-hoc additions after loading the sample
pub const FIRST_FREE_PERSON_ID: u32 = 31;

/// `(person_id, weight)` pairs, in queue order
pub const SAMPLE_PEOPLE: [(u32, f64); 30] = [
    (1, 64.0),
    (2, 53.0),
    (3, 85.0),
    (4, 81.0),
    (5, 78.0),
    (6, 67.0),
    (7, 63.0),
    (8, 119.0),
    (9, 61.0),
    (10, 104.0),
    (11, 54.0),
    (12, 53.0),
    (13, 61.0),
    (14, 77.0),
    (15, 79.0),
    (16, 114.0),
    (17, 53.0),
    (18, 75.0),
    (19, 119.0),
    (20, 103.0),
    (21, 78.0),
    (22, 107.0),
    (23, 85.0),
    (24, 50.0),
    (25, 70.0),
    (26, 104.0),
    (27, 93.0),
    (28, 85.0),
    (29, 69.0),
    (30, 77.0),
];

/// Build fresh items for a list of `(person_id, weight)` pairs
pub fn load(people: &[(u32, f64)], factory: &mut ItemFactory) -> Vec<HeapItem> {
    people
        .iter()
        .map(|&(person_id, weight)| factory.with_person(person_id, weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_person_ids_are_contiguous() {
        let mut factory = ItemFactory::new(FIRST_FREE_PERSON_ID);
        let items = load(&SAMPLE_PEOPLE, &mut factory);

        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.person_id, i as u32 + 1);
        }
        assert_eq!(factory.next_person_id(), FIRST_FREE_PERSON_ID);
    }
}

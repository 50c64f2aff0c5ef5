// Integration tests for the playback controller

use heaptty::heap::is_max_heap;
use heaptty::heap::sample::FIRST_FREE_PERSON_ID;
use heaptty::player::{Mode, Player, PlayerError};
use heaptty::steps::{Phase, Resume};
use std::time::{Duration, Instant};

/// Tick until playback stops on its own, returning how many steps were applied
fn play_out(player: &mut Player, start: Instant) -> usize {
    let mut now = start;
    let mut applied = 0;
    for _ in 0..100_000 {
        if !player.is_playing() {
            return applied;
        }
        if player.tick(now) {
            applied += 1;
        }
        now += Duration::from_millis(player.speed_ms());
    }
    panic!("playback never finished");
}

/// Step until the current run is exhausted
fn step_out(player: &mut Player) {
    while player.step_forward().is_ok() {
        if player.mode() == Mode::Done {
            return;
        }
    }
}

#[test]
fn test_play_builds_a_heap() {
    let mut player = Player::default();
    let start = Instant::now();
    player.play(start).expect("sample queue is not empty");
    assert_eq!(player.mode(), Mode::Inserting);

    let applied = play_out(&mut player, start);
    let snapshot = player.snapshot();

    assert_eq!(applied, player.total_steps());
    assert_eq!(player.mode(), Mode::Done);
    assert_eq!(player.phase(), Phase::Done);
    assert!(player.highlighted().is_empty());
    assert!(snapshot.input.is_empty());
    assert_eq!(snapshot.heap.len(), 30);
    assert!(is_max_heap(&snapshot.heap));
}

#[test]
fn test_tick_waits_for_cadence() {
    let mut player = Player::new(vec![(1, 5.0), (2, 3.0)], 500);
    let start = Instant::now();
    player.play(start).unwrap();

    assert!(player.tick(start));
    assert!(!player.tick(start + Duration::from_millis(100)));
    assert_eq!(player.position(), 1);
    assert!(player.tick(start + Duration::from_millis(600)));
    assert_eq!(player.position(), 2);
}

#[test]
fn test_pause_stops_ticks_and_resume_continues() {
    let mut player = Player::default();
    let start = Instant::now();
    player.play(start).unwrap();
    assert!(player.tick(start));
    let total = player.total_steps();

    player.pause();
    assert!(!player.is_playing());
    assert!(!player.tick(start + Duration::from_secs(60)));
    assert_eq!(player.position(), 1);

    // resuming keeps the cursor and the step list
    let later = start + Duration::from_secs(120);
    player.play(later).unwrap();
    assert_eq!(player.total_steps(), total);
    assert!(player.tick(later));
    assert_eq!(player.position(), 2);
}

#[test]
fn test_toggle() {
    let mut player = Player::default();
    let now = Instant::now();
    assert_eq!(player.toggle(now), Ok(true));
    assert!(player.is_playing());
    assert_eq!(player.toggle(now), Ok(false));
    assert!(!player.is_playing());
}

#[test]
fn test_step_forward_from_idle() {
    let mut player = Player::default();
    player.step_forward().expect("sample queue is not empty");

    assert_eq!(player.mode(), Mode::Inserting);
    assert_eq!(player.position(), 1);
    assert_eq!(player.phase(), Phase::Inserting);
    assert_eq!(player.highlighted(), &[0]);
    assert_eq!(player.snapshot().heap.len(), 1);
    assert_eq!(player.snapshot().input.len(), 29);
    assert_eq!(
        player.message(),
        "Inserting Person 1 (weight: 64) into heap at position 0"
    );
}

#[test]
fn test_step_forward_pauses_playback() {
    let mut player = Player::default();
    let now = Instant::now();
    player.play(now).unwrap();
    player.step_forward().unwrap();
    assert!(!player.is_playing());
    assert!(!player.tick(now + Duration::from_secs(5)));
}

#[test]
fn test_nothing_to_play() {
    let mut player = Player::new(Vec::new(), 800);
    assert_eq!(player.play(Instant::now()), Err(PlayerError::NothingToPlay));
    assert!(!player.is_playing());
    assert_eq!(player.step_forward(), Err(PlayerError::NothingToStep));
    assert_eq!(player.mode(), Mode::Idle);
    assert_eq!(player.extract_all(Instant::now()), Err(PlayerError::EmptyHeap));
}

#[test]
fn test_build_then_extract_sorts_descending() {
    let mut player = Player::default();
    step_out(&mut player);
    assert_eq!(player.mode(), Mode::Done);
    assert!(player.can_extract());

    let start = Instant::now();
    player.extract_all(start).expect("heap is built");
    assert_eq!(player.mode(), Mode::Extracting);
    assert!(player.is_playing());
    assert_eq!(
        player.extract_all(start),
        Err(PlayerError::AlreadyExtracting)
    );
    play_out(&mut player, start);

    let snapshot = player.snapshot();
    assert_eq!(player.mode(), Mode::Done);
    assert!(snapshot.heap.is_empty());
    assert_eq!(snapshot.sorted.len(), 30);
    assert!(snapshot.sorted.windows(2).all(|w| w[0].weight >= w[1].weight));

    let mut people: Vec<u32> = snapshot.sorted.iter().map(|i| i.person_id).collect();
    people.sort_unstable();
    assert_eq!(people, (1..=30).collect::<Vec<_>>());

    // nothing left for either run
    assert!(!player.can_extract());
    assert_eq!(player.extract_all(start), Err(PlayerError::EmptyHeap));
    assert_eq!(player.step_forward(), Err(PlayerError::NothingToStep));
}

#[test]
fn test_extract_mid_sift_finishes_the_sift_first() {
    let mut player = Player::default();
    // stop right after a comparison, before its swap is shown
    loop {
        player.step_forward().unwrap();
        let last = &player.steps()[player.position() - 1];
        if matches!(last.resume, Resume::SwapUp(_)) {
            break;
        }
    }
    assert!(!is_max_heap(&player.snapshot().heap));
    let queued = player.snapshot().input.len();

    let start = Instant::now();
    player.extract_all(start).unwrap();
    play_out(&mut player, start);

    let snapshot = player.snapshot();
    assert!(snapshot.heap.is_empty());
    assert_eq!(snapshot.sorted.len(), 30 - queued);
    assert_eq!(snapshot.input.len(), queued);
    assert!(snapshot.sorted.windows(2).all(|w| w[0].weight >= w[1].weight));
}

#[test]
fn test_invalid_weight_is_ignored() {
    let mut player = Player::default();
    let before = player.snapshot().clone();

    for input in ["abc", "", "0", "-12", "NaN"] {
        assert!(matches!(
            player.add_item(input),
            Err(PlayerError::InvalidWeight { .. })
        ));
    }
    assert!(player.add_weight(f64::INFINITY).is_err());

    assert_eq!(player.snapshot(), &before);
    assert_eq!(player.next_person_id(), FIRST_FREE_PERSON_ID);
}

#[test]
fn test_add_item_while_idle() {
    let mut player = Player::default();
    let item = player.add_item("72").expect("valid weight");

    assert_eq!(item.person_id, 31);
    assert_eq!(item.weight, 72.0);
    assert_eq!(player.snapshot().input.len(), 31);
    assert_eq!(player.snapshot().input.last(), Some(&item));
    assert_eq!(player.total_steps(), 0);
    assert_eq!(player.next_person_id(), 32);
}

#[test]
fn test_add_item_mid_insertion_keeps_shown_steps() {
    let mut player = Player::default();
    for _ in 0..10 {
        player.step_forward().unwrap();
    }
    let shown = player.steps()[..10].to_vec();
    let total = player.total_steps();

    let item = player.add_item("200").unwrap();
    assert_eq!(&player.steps()[..10], shown.as_slice());
    assert_eq!(player.position(), 10);
    assert!(player.total_steps() > total);
    // every pending snapshot knows about the new item
    for step in &player.steps()[10..] {
        let queued = step.snapshot.input.contains(&item);
        let placed = step.snapshot.heap.contains(&item);
        assert!(queued ^ placed);
    }

    step_out(&mut player);
    let snapshot = player.snapshot();
    assert_eq!(snapshot.heap.len(), 31);
    assert!(is_max_heap(&snapshot.heap));
    assert_eq!(snapshot.heap[0], item);
}

#[test]
fn test_add_item_at_every_point_of_insertion() {
    let steps = {
        let mut player = Player::default();
        step_out(&mut player);
        player.total_steps()
    };

    for k in 1..steps {
        let mut player = Player::default();
        for _ in 0..k {
            player.step_forward().unwrap();
        }
        player.add_weight(90.0).unwrap();
        step_out(&mut player);

        let snapshot = player.snapshot();
        assert_eq!(snapshot.heap.len(), 31, "added after step {}", k);
        assert!(snapshot.input.is_empty(), "added after step {}", k);
        assert!(is_max_heap(&snapshot.heap), "added after step {}", k);
    }
}

#[test]
fn test_add_item_mid_extraction_stays_queued() {
    let mut player = Player::default();
    step_out(&mut player);
    let start = Instant::now();
    player.extract_all(start).unwrap();
    for i in 0..15 {
        player.tick(start + Duration::from_secs(i));
    }
    let item = player.add_item("88").unwrap();
    assert!(player.is_playing());

    let rest = player.position();
    assert!(player.steps()[rest..]
        .iter()
        .all(|step| step.snapshot.input == vec![item]));

    play_out(&mut player, start + Duration::from_secs(60));
    let snapshot = player.snapshot();
    assert_eq!(snapshot.sorted.len(), 30);
    assert_eq!(snapshot.input, vec![item]);
    assert!(snapshot.sorted.windows(2).all(|w| w[0].weight >= w[1].weight));
}

#[test]
fn test_add_item_after_done_allows_another_build() {
    let mut player = Player::default();
    step_out(&mut player);
    assert_eq!(player.mode(), Mode::Done);

    player.add_item("300").unwrap();
    assert_eq!(player.mode(), Mode::Idle);
    step_out(&mut player);

    assert_eq!(player.mode(), Mode::Done);
    assert_eq!(player.snapshot().heap.len(), 31);
    assert_eq!(player.snapshot().heap[0].weight, 300.0);
}

#[test]
fn test_reset_restores_sample() {
    let mut player = Player::default();
    let original_ids: Vec<_> = player.snapshot().input.iter().map(|i| i.id).collect();
    let start = Instant::now();
    player.add_item("99").unwrap();
    player.play(start).unwrap();
    player.tick(start);
    player.tick(start + Duration::from_secs(1));

    player.reset();
    assert!(!player.is_playing());
    assert!(!player.tick(start + Duration::from_secs(2)));

    let snapshot = player.snapshot();
    assert_eq!(player.mode(), Mode::Idle);
    assert_eq!(player.phase(), Phase::Idle);
    assert_eq!(player.position(), 0);
    assert_eq!(player.total_steps(), 0);
    assert!(player.message().is_empty());
    assert!(snapshot.heap.is_empty());
    assert!(snapshot.sorted.is_empty());
    assert_eq!(snapshot.input.len(), 30);
    assert_eq!(player.next_person_id(), FIRST_FREE_PERSON_ID);

    // ids are never handed out twice
    assert!(snapshot.input.iter().all(|i| !original_ids.contains(&i.id)));
}

#[test]
fn test_custom_data_numbers_after_largest_person() {
    let mut player = Player::new(vec![(10, 50.0), (4, 60.0)], 800);
    let item = player.add_weight(70.0).unwrap();
    assert_eq!(item.person_id, 11);
}

#[test]
fn test_speed_is_clamped() {
    let mut player = Player::default();
    assert_eq!(player.speed_ms(), 800);
    player.set_speed(10);
    assert_eq!(player.speed_ms(), 100);
    player.set_speed(60_000);
    assert_eq!(player.speed_ms(), 2000);
    player.set_speed(500);
    assert_eq!(player.speed_ms(), 500);
}

#[test]
fn test_largest_person_id_does_not_overflow() {
    let mut player = Player::new(vec![(u32::MAX, 70.0)], 800);
    assert_eq!(player.next_person_id(), u32::MAX);
    assert!(player.add_weight(60.0).is_ok());
}

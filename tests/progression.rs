use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use test_log::test;

use room_trace::config::{RulesConfig, StageConfig};
use room_trace::game::{Direction, Effect, Intent, Phase, Progression};
use room_trace::puzzle::{generate, Catalog};
use room_trace::save::{FileStore, MemoryStore, SaveRecord, SaveStore};

fn start_at<S: SaveStore>(store: S) -> Progression<S> {
    Progression::start(
        StageConfig::default(),
        RulesConfig::default(),
        Catalog::builtin().expect("catalog"),
        store,
        StdRng::seed_from_u64(42),
    )
    .0
}

fn fresh() -> Progression<MemoryStore> {
    start_at(MemoryStore::new())
}

fn press<S: SaveStore>(game: &mut Progression<S>, direction: Direction, times: usize) {
    for _ in 0..times {
        game.handle(Intent::Move(direction), Instant::now());
    }
}

/// Walk in whole steps until the avatar sits on `(x, y)`.
fn walk_to<S: SaveStore>(game: &mut Progression<S>, x: f32, y: f32) {
    let step = game.stage().step;
    let dx = x - game.state().avatar_x;
    let dy = y - game.state().avatar_y;
    let horizontal = if dx < 0.0 { Direction::Left } else { Direction::Right };
    let vertical = if dy < 0.0 { Direction::Up } else { Direction::Down };
    press(game, horizontal, (dx.abs() / step).round() as usize);
    press(game, vertical, (dy.abs() / step).round() as usize);
}

fn walk_to_door<S: SaveStore>(game: &mut Progression<S>) {
    press(game, Direction::Up, 100);
}

fn logs(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Log(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}

fn solve<S: SaveStore>(game: &mut Progression<S>, answer: &str) {
    walk_to_door(game);
    let now = Instant::now();
    game.handle(Intent::Door, now);
    game.handle(Intent::Submit(answer.to_string()), now);
    game.handle(Intent::Close, now);
}

#[test]
fn catalog_rooms_are_found_with_uppercase_answers() {
    let catalog = Catalog::builtin().expect("catalog");
    for id in 1..=13 {
        let room = catalog.find(id).expect("room");
        assert_eq!(room.id, id);
        assert_eq!(room.expected_answer, room.expected_answer.to_uppercase());
    }
}

#[test]
fn generated_rooms_may_differ_between_calls() {
    let mut rng = StdRng::seed_from_u64(8);
    let answers: std::collections::HashSet<String> = (0..40)
        .map(|_| generate(14, &mut rng).expected_answer)
        .collect();
    assert!(answers.len() > 1);
}

#[test]
fn movement_clamps_at_both_edges() {
    let mut game = fresh();
    press(&mut game, Direction::Left, 200);
    assert_eq!(game.state().avatar_x, 0.0);
    press(&mut game, Direction::Left, 1);
    assert_eq!(game.state().avatar_x, 0.0);

    press(&mut game, Direction::Right, 400);
    let max_x = game.stage().width - game.stage().avatar_size;
    assert_eq!(game.state().avatar_x, max_x);
    press(&mut game, Direction::Right, 1);
    assert_eq!(game.state().avatar_x, max_x);

    press(&mut game, Direction::Down, 100);
    assert_eq!(
        game.state().avatar_y,
        game.stage().height - game.stage().avatar_size
    );
}

#[test]
fn distant_door_is_locked_whether_or_not_solved() {
    let mut game = fresh();
    let effects = game.handle(Intent::Door, Instant::now());
    assert!(logs(&effects)[0].contains("locked"));
    assert_eq!(game.phase(), Phase::Exploring);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::PuzzleOpened { .. })));

    solve(&mut game, "2");
    assert!(game.state().solved);
    walk_to(&mut game, 385.0, 400.0);
    let effects = game.handle(Intent::Door, Instant::now());
    assert!(logs(&effects)[0].contains("locked"));
    assert_eq!(game.state().current_room_id, 1);
    assert_eq!(game.store().save_count(), 0);
}

#[test]
fn solved_door_advances_once_and_saves_once() {
    let mut game = fresh();
    solve(&mut game, "2");
    game.handle(Intent::Door, Instant::now());
    assert_eq!(game.state().current_room_id, 2);
    assert_eq!(game.store().save_count(), 1);
    assert!(!game.state().solved, "entering a room resets solved");
    assert_eq!(game.phase(), Phase::Exploring);
    assert_eq!(
        (game.state().avatar_x, game.state().avatar_y),
        (385.0, 400.0)
    );
}

#[test]
fn answers_are_case_and_whitespace_insensitive() {
    let mut game = fresh();
    solve(&mut game, "2");
    assert!(game.state().solved);
    game.handle(Intent::Door, Instant::now());

    walk_to_door(&mut game);
    let now = Instant::now();
    game.handle(Intent::Door, now);
    game.handle(Intent::Submit("wrong".into()), now);
    assert!(!game.state().solved);
    assert_eq!(game.phase(), Phase::PuzzleOpen);

    let effects = game.handle(Intent::Submit("  orange \n".into()), now);
    assert!(game.state().solved);
    assert!(logs(&effects).contains(&"> SYSTEM: Door mechanism unlocked.".to_string()));
}

#[test]
fn closing_puzzle_keeps_solved_flag() {
    let mut game = fresh();
    walk_to_door(&mut game);
    let now = Instant::now();
    game.handle(Intent::Door, now);
    game.handle(Intent::Close, now);
    assert_eq!(game.phase(), Phase::Exploring);
    assert!(!game.state().solved);
}

#[test]
fn interactable_hint_depends_on_distance() {
    let mut game = fresh();
    // Room 1 has one interactable at (200, 300); spawn is (385, 400).
    let effects = game.handle(Intent::Inspect(0), Instant::now());
    assert_eq!(logs(&effects), vec!["> ERROR: Too far to reach."]);

    walk_to(&mut game, 200.0, 300.0);
    let before = game.state().clone();
    let effects = game.handle(Intent::Inspect(0), Instant::now());
    assert_eq!(logs(&effects), vec!["> INVESTIGATE: It is not the number 2."]);
    assert_eq!(game.state(), &before);

    // Exactly at the radius counts as too far.
    walk_to(&mut game, 280.0, 300.0);
    let effects = game.handle(Intent::Inspect(0), Instant::now());
    assert_eq!(logs(&effects), vec!["> ERROR: Too far to reach."]);
    walk_to(&mut game, 275.0, 300.0);
    let effects = game.handle(Intent::Inspect(0), Instant::now());
    assert_eq!(logs(&effects), vec!["> INVESTIGATE: It is not the number 2."]);
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = FileStore::new(dir.path(), "roomTraceSave");
    assert_eq!(store.load().expect("load"), None);
    store.save(&SaveRecord { room_id: 5 }).expect("save");
    assert_eq!(store.load().expect("load"), Some(SaveRecord { room_id: 5 }));

    let game = start_at(FileStore::new(dir.path(), "roomTraceSave"));
    assert_eq!(game.state().current_room_id, 5);

    let fresh_dir = TempDir::new().expect("tempdir");
    let game = start_at(FileStore::new(fresh_dir.path(), "roomTraceSave"));
    assert_eq!(game.state().current_room_id, 1);
}

#[test]
fn progress_survives_a_restart() {
    let dir = TempDir::new().expect("tempdir");
    let mut game = start_at(FileStore::new(dir.path(), "slot"));
    solve(&mut game, "2");
    game.handle(Intent::Door, Instant::now());
    drop(game);

    let game = start_at(FileStore::new(dir.path(), "slot"));
    assert_eq!(game.state().current_room_id, 2);
    assert!(!game.state().solved);
}

#[test]
fn generated_rooms_accept_any_non_empty_answer() {
    let mut game = start_at(MemoryStore::with_raw(r#"{"roomId":13}"#));
    solve(&mut game, "trace");
    game.handle(Intent::Door, Instant::now());
    assert_eq!(game.state().current_room_id, 14);
    assert_eq!(game.room().kind, "random");
    assert_eq!(game.room().interactables.len(), 1);

    walk_to_door(&mut game);
    let now = Instant::now();
    game.handle(Intent::Door, now);
    game.handle(Intent::Submit("   ".into()), now);
    assert!(!game.state().solved);
    game.handle(Intent::Submit("not a number".into()), now);
    assert!(game.state().solved);
}

#[test]
fn reopening_generated_puzzle_draws_a_new_question() {
    let mut game = start_at(MemoryStore::with_raw(r#"{"roomId":20}"#));
    walk_to_door(&mut game);
    let now = Instant::now();
    let mut prompts = std::collections::HashSet::new();
    for _ in 0..30 {
        game.handle(Intent::Door, now);
        prompts.insert(game.prompt().expect("open").to_string());
        game.handle(Intent::Close, now);
    }
    assert!(prompts.len() > 1);
}

#[test]
fn save_at_the_id_ceiling_starts_over() {
    let game = start_at(MemoryStore::with_raw(r#"{"roomId":4294967295}"#));
    assert_eq!(game.state().current_room_id, 1);
}

#[test]
fn last_room_does_not_advance_or_save() {
    let mut game = start_at(MemoryStore::with_raw(r#"{"roomId":4294967294}"#));
    assert_eq!(game.state().current_room_id, u32::MAX - 1);
    walk_to_door(&mut game);
    let now = Instant::now();
    game.handle(Intent::Door, now);
    game.handle(Intent::Submit("anything".to_string()), now);
    game.handle(Intent::Close, now);
    let effects = game.handle(Intent::Door, now);
    assert_eq!(logs(&effects), vec!["> DOOR: No sectors remain.".to_string()]);
    assert_eq!(game.state().current_room_id, u32::MAX - 1);
    assert_eq!(game.store().save_count(), 0);
}

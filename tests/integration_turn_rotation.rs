use turnclock::roster::{MAX_PLAYERS, MIN_PLAYERS};
use turnclock::rotation::RotationMode;
use turnclock::session::{SessionConfig, SessionState};

/// End-to-end checks of the turn clock and rotation rules using only the
/// public session API.

fn session(players: usize, mode: RotationMode) -> SessionState {
    SessionState::new(&SessionConfig {
        number_of_players: players,
        names: Vec::new(),
        rotation_mode: mode,
    })
}

fn tick(s: &mut SessionState, n: u64) {
    for _ in 0..n {
        s.tick();
    }
}

#[test]
fn commit_moves_exactly_the_running_turn() {
    for mode in [RotationMode::Clockwise, RotationMode::Anticlockwise] {
        let mut s = session(5, mode);
        s.start();
        for round in 1..=12u64 {
            let active = s.active_index();
            let before = s.players()[active].accumulated_secs();
            let turns_before = s.players()[active].turn_count();
            tick(&mut s, round);
            let pending = s.current_turn_secs();

            assert!(s.advance_turn());

            let player = &s.players()[active];
            assert_eq!(player.accumulated_secs(), before + pending);
            assert_eq!(player.turn_count(), turns_before + 1);
            assert_eq!(s.current_turn_secs(), 0);
        }
    }
}

#[test]
fn manual_selection_commits_previous_player() {
    let mut s = session(6, RotationMode::Manual);
    s.start();
    let order = [3usize, 1, 5, 0, 4, 2];
    for (i, &next) in order.iter().enumerate() {
        let prev = s.active_index();
        let before = s.players()[prev].accumulated_secs();
        tick(&mut s, i as u64 + 1);
        assert!(s.select_player(next));
        assert_eq!(s.players()[prev].accumulated_secs(), before + i as u64 + 1);
        assert_eq!(s.active_index(), next);
        assert_eq!(s.current_turn_secs(), 0);
    }
}

#[test]
fn total_is_the_sum_of_committed_and_running_time() {
    let mut s = session(4, RotationMode::Anticlockwise);
    s.start();
    for n in [3, 1, 4, 1, 5, 9, 2, 6] {
        tick(&mut s, n);
        s.advance_turn();
    }
    tick(&mut s, 7);
    let committed: u64 = s.players().iter().map(|p| p.accumulated_secs()).sum();
    assert_eq!(s.total_secs(), committed + s.current_turn_secs());
    assert_eq!(s.total_secs(), 38);
}

#[test]
fn reset_is_idempotent() {
    let mut s = session(3, RotationMode::Clockwise);
    s.add_player();
    s.start();
    tick(&mut s, 4);
    s.advance_turn();
    tick(&mut s, 2);

    s.reset();
    let names_once: Vec<String> = s.players().iter().map(|p| p.name.clone()).collect();
    let ids_once: Vec<u32> = s.players().iter().map(|p| p.id()).collect();
    s.reset();

    assert_eq!(s.players().len(), 4);
    assert_eq!(s.active_index(), 0);
    assert_eq!(s.total_secs(), 0);
    assert_eq!(s.current_turn_secs(), 0);
    assert!(!s.is_running());
    assert_eq!(
        s.players().iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
        names_once
    );
    assert_eq!(
        s.players().iter().map(|p| p.id()).collect::<Vec<_>>(),
        ids_once
    );
}

#[test]
fn roster_never_leaves_bounds_under_mixed_actions() {
    let mut s = session(2, RotationMode::Clockwise);
    // a fixed pseudo-random walk of add/remove actions
    let mut state = 17u32;
    for _ in 0..500 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        if state % 2 == 0 {
            s.add_player();
        } else {
            s.remove_player();
        }
        let n = s.players().len();
        assert!((MIN_PLAYERS..=MAX_PLAYERS).contains(&n));
        assert!(s.active_index() < n);
    }
}

#[test]
fn removing_players_after_rotation_falls_back_to_first_seat() {
    let mut s = session(5, RotationMode::Anticlockwise);
    s.advance_turn();
    assert_eq!(s.active_index(), 4);
    s.remove_player();
    assert_eq!(s.active_index(), 0);
    s.advance_turn();
    assert_eq!(s.active_index(), 3);
}

//! Controller tests - commands, gravity, locking, levels and auto-restart

use blockfall::core::pieces::catalog_mask;
use blockfall::core::progression::drop_interval_ms;
use blockfall::core::{
    collides, ActivePiece, Arena, GameController, Progression, RotationOutcome, RotationPolicy,
    Settings,
};
use blockfall::types::{Command, PieceKind, Pos};
use proptest::prelude::*;

fn game(seed: u32) -> GameController {
    GameController::new(Settings {
        seed,
        ..Settings::default()
    })
    .unwrap()
}

fn place(game: &mut GameController, kind: PieceKind, x: i32, y: i32) {
    let mask = catalog_mask(kind).painted(kind.tag());
    game.set_active(ActivePiece::new(kind, mask, Pos::new(x, y)));
}

/// Fill the bottom `rows` rows, leaving a two-wide well in columns 4 and 5
fn stack_with_well(game: &mut GameController, rows: i32) {
    let height = game.arena().height() as i32;
    let width = game.arena().width() as i32;
    for y in height - rows..height {
        for x in 0..width {
            if x != 4 && x != 5 {
                game.arena_mut().set(x, y, 1);
            }
        }
    }
}

/// Drop an O into the well, clearing two rows
fn fill_well(game: &mut GameController) -> usize {
    place(game, PieceKind::O, 4, 0);
    let before = game.lines_cleared();
    game.apply_command(Command::HardDrop);
    (game.lines_cleared() - before) as usize
}

// ============== Rotation ==============

#[test]
fn test_o_rotation_is_a_no_op() {
    let mut game = game(1);
    place(&mut game, PieceKind::O, 4, 5);
    let before = *game.active();

    assert_eq!(game.rotate(), RotationOutcome::Resolved { kick: 0 });
    assert_eq!(*game.active(), before);
}

#[test]
fn test_centered_i_turns_vertical_without_kick() {
    let mut game = game(1);
    place(&mut game, PieceKind::I, 4, 5);

    assert_eq!(game.rotate(), RotationOutcome::Resolved { kick: 0 });
    assert_eq!(game.active().anchor(), Pos::new(4, 5));
    let cells: Vec<Pos> = game.active().cells().into_iter().collect();
    assert_eq!(
        cells,
        [Pos::new(6, 5), Pos::new(6, 6), Pos::new(6, 7), Pos::new(6, 8)]
    );
}

#[test]
fn test_rotation_kicks_off_left_wall() {
    let mut game = game(1);
    // Vertical I in mask column 1 hugging the left wall (rotated three times)
    let kind = PieceKind::I;
    let mask = catalog_mask(kind)
        .painted(kind.tag())
        .rotated_cw()
        .rotated_cw()
        .rotated_cw();
    game.set_active(ActivePiece::new(kind, mask, Pos::new(-1, 5)));

    // Back to horizontal needs x >= 0; the first kick (+1) fits.
    assert_eq!(game.rotate(), RotationOutcome::Resolved { kick: 1 });
    assert_eq!(game.active().anchor(), Pos::new(0, 5));
}

#[test]
fn test_policy_comes_from_settings() {
    let game = GameController::new(Settings {
        rotation_policy: RotationPolicy::Strict,
        ..Settings::default()
    })
    .unwrap();
    assert_eq!(game.rotation_policy(), RotationPolicy::Strict);
    assert_eq!(Settings::default().rotation_policy, RotationPolicy::Permissive);
}

// ============== Dropping ==============

#[test]
fn test_hard_drop_from_spawn_lands_on_floor() {
    for seed in [1, 7, 42, 1000, 65_535] {
        let mut game = game(seed);
        let piece = *game.active();
        let tag = piece.kind().tag();

        game.apply_command(Command::HardDrop);

        let arena = game.arena();
        assert_eq!(arena.occupied_count(), 4, "seed {}", seed);
        assert!(arena.row(19).contains(&tag), "seed {}", seed);
        assert!(arena.cells().iter().all(|&c| c == 0 || c == tag));
        assert_eq!(game.active().anchor(), Pos::new(4, 0));
        assert_eq!(game.pieces_spawned(), 2);
    }
}

#[test]
fn test_soft_drop_command_and_gravity_share_a_path() {
    let mut by_command = game(5);
    let mut by_gravity = game(5);

    for step in 1..=25u64 {
        by_command.apply_command(Command::SoftDrop);
        by_gravity.tick(step * 1000);
    }

    assert_eq!(by_command.arena(), by_gravity.arena());
    assert_eq!(by_command.active(), by_gravity.active());
    assert_eq!(by_command.pieces_spawned(), by_gravity.pieces_spawned());
}

#[test]
fn test_unknown_command_names_are_ignored() {
    let mut game = game(3);
    let before = *game.active();
    for name in ["hold", "rotateLeft", ""] {
        if let Some(cmd) = Command::from_str(name) {
            game.apply_command(cmd);
        }
    }
    assert_eq!(*game.active(), before);
}

// ============== Lines and levels ==============

#[test]
fn test_level_up_sets_exact_interval() {
    let mut game = game(11);
    stack_with_well(&mut game, 6);

    assert_eq!(fill_well(&mut game), 2);
    assert_eq!(fill_well(&mut game), 2);
    assert_eq!(game.level(), 1);
    assert_eq!(fill_well(&mut game), 2);

    assert_eq!(game.lines_cleared(), 6);
    assert_eq!(game.level(), 2);
    assert_eq!(game.drop_interval_ms(), 1000.0 * 0.9_f64.powi(2));
    assert_eq!(game.arena().occupied_count(), 0);
}

#[test]
fn test_faster_gravity_after_level_up() {
    let mut game = game(11);
    stack_with_well(&mut game, 6);
    for _ in 0..3 {
        fill_well(&mut game);
    }
    assert_eq!(game.level(), 2);

    place(&mut game, PieceKind::T, 4, 0);
    assert!(!game.tick(800));
    assert!(game.tick(811));
    assert_eq!(game.active().anchor(), Pos::new(4, 1));
}

#[test]
fn test_progression_thresholds() {
    let mut progress = Progression::new();
    progress.record_lines(5);
    assert_eq!(progress.level(), 1);

    // 6 > 1 * 5
    assert!(progress.record_line());
    assert_eq!(progress.level(), 2);
    assert_eq!(progress.drop_interval_ms(), drop_interval_ms(2));

    // Level 3 needs more than 10
    progress.record_lines(4);
    assert_eq!(progress.level(), 2);
    assert!(progress.record_line());
    assert_eq!(progress.level(), 3);
    assert_eq!(progress.drop_interval_ms(), 1000.0 * 0.9_f64.powi(3));
}

// ============== Game over ==============

#[test]
fn test_blocked_spawn_restarts_but_keeps_line_total() {
    let mut game = game(11);
    stack_with_well(&mut game, 6);
    for _ in 0..3 {
        fill_well(&mut game);
    }
    assert_eq!(game.level(), 2);

    // Stack up to row 2 with a gap in the last column so no row is full.
    for y in 2..20 {
        for x in 0..11 {
            game.arena_mut().set(x, y, 1);
        }
    }
    // An O locked on rows 0-1 overlaps every catalog shape at the spawn anchor.
    place(&mut game, PieceKind::O, 4, 0);
    game.apply_command(Command::SoftDrop);

    assert_eq!(game.episode(), 1);
    assert_eq!(game.arena().occupied_count(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.drop_interval_ms(), 1000.0);
    assert_eq!(game.drop_counter_ms(), 0.0);
    assert_eq!(game.lines_cleared(), 6);
    assert_eq!(game.active().anchor(), Pos::new(4, 0));
    assert!(!collides(game.active().mask(), game.active().anchor(), game.arena()));
}

#[test]
fn test_restart_can_be_called_directly() {
    let mut game = game(2);
    game.apply_command(Command::HardDrop);
    assert!(game.arena().occupied_count() > 0);

    game.restart();
    assert_eq!(game.episode(), 1);
    assert_eq!(game.arena().occupied_count(), 0);
    assert_eq!(game.pieces_spawned(), 3);
}

// ============== Properties ==============

fn command_from(code: u8) -> Option<Command> {
    match code {
        0 => Some(Command::MoveLeft),
        1 => Some(Command::MoveRight),
        2 => Some(Command::SoftDrop),
        3 => Some(Command::Rotate),
        4 => Some(Command::HardDrop),
        _ => None,
    }
}

fn arena_strategy() -> impl Strategy<Value = Arena> {
    (1usize..10, 1usize..10)
        .prop_flat_map(|(w, h)| {
            let cells = prop::collection::vec(prop::bool::weighted(0.3), w * h);
            (Just(w), Just(h), cells)
        })
        .prop_map(|(w, h, filled)| {
            let mut arena = Arena::new(w, h).unwrap();
            for (i, &on) in filled.iter().enumerate() {
                if on {
                    arena.set((i % w) as i32, (i / w) as i32, 1);
                }
            }
            arena
        })
}

proptest! {
    #[test]
    fn collides_matches_cell_by_cell_check(
        arena in arena_strategy(),
        kind_idx in 0usize..7,
        turns in 0usize..4,
        x in -5i32..12,
        y in -5i32..12,
    ) {
        let mut mask = catalog_mask(PieceKind::ALL[kind_idx]);
        for _ in 0..turns {
            mask = mask.rotated_cw();
        }

        let mut expected = false;
        for my in 0..mask.size() {
            for mx in 0..mask.size() {
                if mask.get(mx, my) == 0 {
                    continue;
                }
                let ax = x + mx as i32;
                let ay = y + my as i32;
                let inside = ax >= 0
                    && ay >= 0
                    && (ax as usize) < arena.width()
                    && (ay as usize) < arena.height();
                if !inside || arena.get(ax, ay) != Some(0) {
                    expected = true;
                }
            }
        }

        prop_assert_eq!(collides(&mask, Pos::new(x, y), &arena), expected);
    }

    #[test]
    fn strict_rollout_keeps_core_invariants(
        seed in any::<u32>(),
        width in 4usize..16,
        height in 4usize..24,
        codes in prop::collection::vec(0u8..6, 1..300),
    ) {
        let mut game = GameController::new(Settings {
            width,
            height,
            seed,
            rotation_policy: RotationPolicy::Strict,
        })
        .unwrap();

        let mut now = 0u64;
        let mut last_lines = 0;
        for code in codes {
            match command_from(code) {
                Some(cmd) => {
                    game.apply_command(cmd);
                }
                None => {
                    now += 250;
                    game.tick(now);
                }
            }

            let active = game.active();
            prop_assert!(!collides(active.mask(), active.anchor(), game.arena()));
            prop_assert!(game.lines_cleared() >= last_lines);
            last_lines = game.lines_cleared();
            prop_assert!(game.level() >= 1);
            let interval = if game.level() == 1 { 1000.0 } else { drop_interval_ms(game.level()) };
            prop_assert_eq!(game.drop_interval_ms(), interval);
            prop_assert_eq!(game.arena().width(), width);
            prop_assert_eq!(game.arena().height(), height);
            prop_assert!(game.arena().cells().iter().all(|&c| c <= 7));

            let ghost = game.ghost();
            prop_assert_eq!(ghost.anchor.x, active.anchor().x);
            prop_assert!(ghost.anchor.y < height as i32);
        }
    }
}

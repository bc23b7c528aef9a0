/// Integration tests for game logic
///
/// These tests drive a whole session through the public API and check the
/// gameplay rules: hits and kills, player collisions, the end-of-game
/// conditions and session resets.
use arena_shooter::{
    Bullet, Command, Enemy, FrameInput, GameConfig, GameEvent, Heading, Phase, Session,
};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

const PLAYFIELD: Vec2 = Vec2::new(800.0, 600.0);

fn playing_session(now: Instant) -> Session {
    let mut session = Session::new(GameConfig::default().gameplay, PLAYFIELD, now);
    session.apply(Command::Start, now);
    session.take_events();
    session
}

fn idle(session: &Session) -> FrameInput {
    FrameInput {
        heading: Heading::default(),
        cursor: session.player.pos + Vec2::new(50.0, 0.0),
    }
}

/// A bullet that will sit exactly on `target` after one frame of travel
/// to the right.
fn bullet_arriving_at(target: Vec2) -> Bullet {
    Bullet {
        pos: target - Vec2::new(10.0, 0.0),
        dir: Vec2::X,
    }
}

#[test]
fn test_enemy_needs_three_hits_to_die() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.enemies.push(Enemy::new(Vec2::new(100.0, 300.0), 3, 20.0));

    // Enemy walks 5 units towards the player each frame
    let mut expected_pos = Vec2::new(100.0, 300.0);
    for expected_health in [2, 1] {
        expected_pos.x += 5.0;
        session.bullets.push(bullet_arriving_at(expected_pos));
        let input = idle(&session);
        session.update(&input, now, &mut rng);

        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.enemies[0].pos, expected_pos);
        assert_eq!(session.enemies[0].health, expected_health);
        assert!(session.bullets.is_empty());
        assert_eq!(session.score, 0);
    }

    expected_pos.x += 5.0;
    session.bullets.push(bullet_arriving_at(expected_pos));
    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert!(session.enemies.is_empty());
    assert!(session.bullets.is_empty());
    assert_eq!(session.score, 10);
    let events = session.take_events();
    assert!(events.contains(&GameEvent::EnemyDestroyed));
    assert_eq!(
        events.iter().filter(|e| **e == GameEvent::EnemyHit).count(),
        3
    );
}

#[test]
fn test_one_bullet_hits_two_overlapping_enemies() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    // Both enemies end the frame 10 units either side of the bullet
    session.enemies.push(Enemy::new(Vec2::new(100.0, 290.0), 3, 20.0));
    session.enemies.push(Enemy::new(Vec2::new(100.0, 310.0), 3, 20.0));
    session.bullets.push(Bullet {
        pos: Vec2::new(95.0, 300.0),
        dir: Vec2::X,
    });

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.enemies.len(), 2);
    assert!(session.enemies.iter().all(|e| e.health == 2));
    assert!(session.bullets.is_empty());
}

#[test]
fn test_several_bullets_hit_one_enemy_in_a_frame() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.enemies.push(Enemy::new(Vec2::new(100.0, 300.0), 3, 20.0));
    session.bullets.push(bullet_arriving_at(Vec2::new(105.0, 300.0)));
    session.bullets.push(bullet_arriving_at(Vec2::new(108.0, 300.0)));
    // Far away, must survive the frame
    session.bullets.push(bullet_arriving_at(Vec2::new(600.0, 100.0)));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.enemies[0].health, 1);
    assert_eq!(session.bullets.len(), 1);
    assert_eq!(session.bullets[0].pos, Vec2::new(600.0, 100.0));
}

#[test]
fn test_bullets_on_enemy_killed_this_frame_are_spent() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.enemies.push(Enemy::new(Vec2::new(100.0, 300.0), 1, 20.0));
    session.bullets.push(bullet_arriving_at(Vec2::new(105.0, 300.0)));
    session.bullets.push(bullet_arriving_at(Vec2::new(106.0, 300.0)));
    session.bullets.push(bullet_arriving_at(Vec2::new(107.0, 300.0)));
    // A second enemy further along the same line must not inherit the leftovers
    session.enemies.push(Enemy::new(Vec2::new(200.0, 300.0), 1, 20.0));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.score, 10);
    assert!(session.bullets.is_empty());
    assert_eq!(session.enemies.len(), 1);
    let events = session.take_events();
    let hits = events.iter().filter(|e| **e == GameEvent::EnemyHit).count();
    let kills = events
        .iter()
        .filter(|e| **e == GameEvent::EnemyDestroyed)
        .count();
    assert_eq!(hits, 1);
    assert_eq!(kills, 1);

    // Nothing left in flight to reach the second enemy
    session.update(&input, now, &mut rng);
    assert_eq!(session.enemies.len(), 1);
    assert_eq!(session.enemies[0].health, 1);
}

#[test]
fn test_enemy_touching_player_is_removed_and_hurts() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    let player_pos = session.player.pos;
    session
        .enemies
        .push(Enemy::new(player_pos + Vec2::new(45.0, 0.0), 3, 20.0));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert!(session.enemies.is_empty());
    assert_eq!(session.player.health, 90);
    assert_eq!(session.score, 0);
    assert!(session.take_events().contains(&GameEvent::PlayerHit));
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn test_enemy_just_out_of_reach_survives() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    let player_pos = session.player.pos;
    // After its 5 unit step the enemy is exactly tangent to the player
    session
        .enemies
        .push(Enemy::new(player_pos + Vec2::new(50.0, 0.0), 3, 20.0));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.enemies.len(), 1);
    assert_eq!(session.player.health, 100);
}

#[test]
fn test_killed_and_colliding_enemy_counted_once() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    let player_pos = session.player.pos;
    let enemy_start = player_pos + Vec2::new(40.0, 0.0);
    session.enemies.push(Enemy::new(enemy_start, 1, 20.0));
    session
        .bullets
        .push(bullet_arriving_at(enemy_start - Vec2::new(5.0, 0.0)));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert!(session.enemies.is_empty());
    assert_eq!(session.score, 10);
    assert_eq!(session.player.health, 90);
    let events = session.take_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == GameEvent::EnemyDestroyed)
            .count(),
        1
    );
}

#[test]
fn test_health_loss_beats_victory() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.player.health = 10;
    session.score = 200;
    let player_pos = session.player.pos;
    session
        .enemies
        .push(Enemy::new(player_pos + Vec2::new(30.0, 0.0), 3, 20.0));

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.player.health, 0);
    assert_eq!(session.phase(), Phase::GameOver { victory: false });
    assert!(!session.phase().victory());
}

#[test]
fn test_reaching_victory_score_wins() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.score = 190;
    session.enemies.push(Enemy::new(Vec2::new(100.0, 300.0), 1, 20.0));
    session
        .bullets
        .push(bullet_arriving_at(Vec2::new(105.0, 300.0)));
    // A stray bullet that would otherwise still be flying
    session.bullets.push(Bullet {
        pos: Vec2::new(700.0, 50.0),
        dir: Vec2::Y,
    });

    let input = idle(&session);
    session.update(&input, now, &mut rng);

    assert_eq!(session.score, 200);
    assert_eq!(session.phase(), Phase::GameOver { victory: true });
    assert!(session.phase().victory());
    assert!(session.bullets.is_empty());
    assert!(session.take_events().contains(&GameEvent::PhaseChanged {
        from: Phase::Playing,
        to: Phase::GameOver { victory: true },
    }));
}

#[test]
fn test_game_over_freezes_session() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.score = 200;
    let input = idle(&session);
    session.update(&input, now, &mut rng);
    assert!(matches!(session.phase(), Phase::GameOver { .. }));

    let before_pos = session.player.pos;
    let input = FrameInput {
        heading: Heading {
            up: true,
            ..Default::default()
        },
        cursor: Vec2::ZERO,
    };
    session.update(&input, now + Duration::from_secs(10), &mut rng);
    assert_eq!(session.player.pos, before_pos);
    assert!(session.enemies.is_empty());

    session.apply(Command::Fire(Vec2::ZERO), now);
    assert!(session.bullets.is_empty());
}

#[test]
fn test_restart_clears_everything() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(5);

    // Play a while: move, shoot and let enemies spawn
    let input = FrameInput {
        heading: Heading {
            left: true,
            ..Default::default()
        },
        cursor: Vec2::ZERO,
    };
    for frame in 0..300u64 {
        if frame % 10 == 0 {
            session.apply(Command::Fire(Vec2::new(0.0, 0.0)), now);
        }
        session.update(&input, now + Duration::from_millis(frame * 16), &mut rng);
    }
    session.player.health = 0;
    session.update(&input, now + Duration::from_secs(6), &mut rng);
    assert_eq!(session.phase(), Phase::GameOver { victory: false });

    let restart_time = now + Duration::from_secs(7);
    session.apply(Command::Restart, restart_time);

    assert_eq!(session.phase(), Phase::Playing);
    assert!(session.bullets.is_empty());
    assert!(session.enemies.is_empty());
    assert_eq!(session.score, 0);
    assert_eq!(session.player.health, 100);
    assert_eq!(session.player.pos, Vec2::new(400.0, 300.0));
    assert_eq!(session.spawn_timer().last_spawn(), restart_time);
}

#[test]
fn test_return_to_menu_then_start_again() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(1);
    session.score = 250;
    let input = idle(&session);
    session.update(&input, now, &mut rng);

    session.apply(Command::ReturnToMenu, now);
    assert_eq!(session.phase(), Phase::Menu);

    session.apply(Command::Start, now);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.score, 0);
}

#[test]
fn test_reset_is_idempotent() {
    let now = Instant::now();
    let mut session = playing_session(now);
    session.score = 70;
    session.player.health = 40;
    session.enemies.push(Enemy::new(Vec2::new(10.0, 10.0), 2, 20.0));
    session.bullets.push(bullet_arriving_at(Vec2::new(50.0, 50.0)));

    let reset_time = now + Duration::from_secs(3);
    session.reset(reset_time);
    let first = (
        session.player.clone(),
        session.bullets.clone(),
        session.enemies.clone(),
        session.score,
        session.phase(),
        *session.spawn_timer(),
    );
    session.reset(reset_time);
    let second = (
        session.player.clone(),
        session.bullets.clone(),
        session.enemies.clone(),
        session.score,
        session.phase(),
        *session.spawn_timer(),
    );
    assert_eq!(first, second);
}

#[test]
fn test_spawned_enemies_walk_in_from_outside() {
    let now = Instant::now();
    let mut session = playing_session(now);
    let mut rng = StdRng::seed_from_u64(11);
    let input = idle(&session);
    session.update(&input, now + Duration::from_millis(1501), &mut rng);

    assert_eq!(session.enemies.len(), 1);
    let enemy = &session.enemies[0];
    assert_eq!(enemy.health, 3);
    assert_eq!(enemy.radius, 20.0);
    // Spawned 20 units outside, then took one 5 unit step inwards
    let outside = enemy.pos.x < 0.0 || enemy.pos.x > 800.0 || enemy.pos.y < 0.0 || enemy.pos.y > 600.0;
    assert!(outside);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_health_and_score_stay_in_range(
            seed in any::<u64>(),
            frames in prop::collection::vec(
                (any::<[bool; 4]>(), any::<bool>(), 0.0f32..800.0, 0.0f32..600.0),
                1..400,
            ),
        ) {
            let now = Instant::now();
            let mut session = playing_session(now);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut last_score = 0;

            for (i, ([up, down, left, right], fire, cx, cy)) in frames.into_iter().enumerate() {
                let at = now + Duration::from_millis(i as u64 * 100);
                let cursor = Vec2::new(cx, cy);
                if fire {
                    session.apply(Command::Fire(cursor), at);
                }
                let input = FrameInput {
                    heading: Heading { up, down, left, right },
                    cursor,
                };
                session.update(&input, at, &mut rng);

                prop_assert!(session.player.health <= 100);
                prop_assert!(session.score >= last_score);
                last_score = session.score;

                let pos = session.player.pos;
                prop_assert!((25.0..=775.0).contains(&pos.x));
                prop_assert!((25.0..=575.0).contains(&pos.y));

                if session.phase() != Phase::Playing {
                    prop_assert!(session.bullets.is_empty());
                    break;
                }
            }
        }
    }
}

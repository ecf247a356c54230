use crate::commands::PlayerCommand;
use crate::constants::*;
use crate::enums::*;
use crate::events::AudioEvent;
use crate::state::GameStateSnapshot;
use crate::types::{DevParams, Position, SimTime, Velocity};

#[test]
fn test_enemy_kind_serde() {
    for v in EnemyKind::ALL {
        let json = serde_json::to_string(&v).unwrap();
        let back: EnemyKind = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
    assert_eq!(
        serde_json::to_string(&EnemyKind::Splitter).unwrap(),
        "\"splitter\""
    );
}

#[test]
fn test_upgrade_kind_wire_names() {
    assert_eq!(
        serde_json::to_string(&UpgradeKind::FireRate).unwrap(),
        "\"fireRate\""
    );
    assert_eq!(
        serde_json::to_string(&UpgradeKind::MultiShot).unwrap(),
        "\"multiShot\""
    );
    assert_eq!(
        serde_json::to_string(&PermanentUpgradeKind::StartingDamage).unwrap(),
        "\"startingDamage\""
    );
}

#[test]
fn test_player_command_tagged() {
    let cmd = PlayerCommand::TriggerUltimate { index: 2 };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"type\":\"TriggerUltimate\""));
    let back: PlayerCommand = serde_json::from_str(&json).unwrap();
    match back {
        PlayerCommand::TriggerUltimate { index } => assert_eq!(index, 2),
        other => panic!("Expected TriggerUltimate, got {other:?}"),
    }

    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"BuyUpgrade","kind":"explosive"}"#).unwrap();
    assert!(matches!(
        cmd,
        PlayerCommand::BuyUpgrade {
            kind: UpgradeKind::Explosive
        }
    ));
}

#[test]
fn test_dev_params_partial_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"SetDevParams","params":{"god_mode":true}}"#).unwrap();
    let PlayerCommand::SetDevParams { params } = cmd else {
        panic!("Expected SetDevParams");
    };
    assert!(params.god_mode);
    assert_eq!(params.enemy_speed_multiplier, 1.0);
    assert_eq!(params.player_damage_multiplier, 1.0);
    assert!(!params.one_hit_kill);
}

#[test]
fn test_audio_event_tagged() {
    let ev = AudioEvent::WaveComplete { wave: 4 };
    let json = serde_json::to_string(&ev).unwrap();
    assert_eq!(json, r#"{"type":"WaveComplete","wave":4}"#);
}

#[test]
fn test_ultimate_kind_index() {
    for (i, kind) in UltimateKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), i);
        assert_eq!(UltimateKind::from_index(i), Some(*kind));
    }
    assert_eq!(UltimateKind::from_index(3), None);
}

#[test]
fn test_position_geometry() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);

    // Straight down the screen is +pi/2 with y growing downward.
    let down = Position::new(0.0, 10.0);
    assert!((a.angle_to(&down) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_velocity_from_angle() {
    let v = Velocity::from_angle(0.0, 480.0);
    assert!((v.x - 480.0).abs() < 1e-9);
    assert!(v.y.abs() < 1e-9);
    assert!((v.speed() - 480.0).abs() < 1e-9);
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    for _ in 0..TICK_RATE {
        t.advance();
    }
    assert_eq!(t.tick, TICK_RATE as u64);
    assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_snapshot_default_serializes() {
    let snap = GameStateSnapshot::default();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, GamePhase::Active);
    assert!(back.enemies.is_empty());
    assert!(back.effect.is_none());
}

#[test]
fn test_field_geometry_constants() {
    assert!(CANNON_Y < FIELD_HEIGHT);
    assert!(SHIELD_Y < CANNON_Y);
    assert!(ESCAPE_Y > FIELD_HEIGHT);
    assert!(SPAWN_Y < 0.0);
    assert_eq!(DevParams::default().money_multiplier, 1.0);
}

#[test]
fn test_dev_params_sanitized() {
    let raw = DevParams {
        enemy_health_multiplier: -3.0,
        enemy_speed_multiplier: 0.0,
        player_damage_multiplier: f64::NAN,
        money_multiplier: 0.0,
        ..Default::default()
    };
    let dev = raw.sanitized();
    assert_eq!(dev.enemy_health_multiplier, MIN_DEV_MULTIPLIER);
    assert_eq!(dev.enemy_speed_multiplier, MIN_DEV_MULTIPLIER);
    assert_eq!(dev.player_damage_multiplier, MIN_DEV_MULTIPLIER);
    assert_eq!(dev.money_multiplier, 0.0);
    assert_eq!(DevParams::default().sanitized(), DevParams::default());
}

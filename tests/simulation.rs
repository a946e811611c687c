use std::f64::consts::PI;

use torus_flock::*;

fn seeded_board(seed: u64) -> Board {
    let config = SimConfig {
        rows: 12,
        cols: 18,
        birds: 9,
        blocks: 4,
        speed: 4.0,
        seed: Some(seed),
        ..Default::default()
    };
    Board::from_config(&config).expect("valid config")
}

#[test]
fn same_seed_same_trajectory() {
    let mut first = seeded_board(2024);
    let mut second = seeded_board(2024);
    assert_eq!(first.birds(), second.birds());

    for _ in 0..50 {
        first.tick();
        second.tick();
    }

    assert_eq!(first.tick_count(), 50);
    assert_eq!(first.birds(), second.birds());
    assert_eq!(first.blocks(), second.blocks());
    assert_eq!(first.to_records(), second.to_records());
    assert_eq!(first.render_text(), second.render_text());
}

#[test]
fn influence_weighting_is_reproducible_too() {
    let steering = Steering {
        weighting: Weighting::Influence,
        isolation: Isolation::Reset,
    };
    let build = || {
        let mut board = Board::with_seed(15, 15, 77)
            .unwrap()
            .with_steering(steering)
            .with_influence(2.0, 0.5);
        for _ in 0..6 {
            board.add_random_bird();
        }
        board.add_block(7, 7).unwrap();
        board
    };
    let mut first = build();
    let mut second = build();
    for _ in 0..25 {
        first.tick();
        second.tick();
    }
    assert_eq!(first.birds(), second.birds());
    assert!(first.birds().iter().all(|p| p.occupant.a == 2.0 && p.occupant.b == 0.5));
}

#[test]
fn headings_stay_normalized_and_positions_in_bounds() {
    let mut board = seeded_board(31);
    for _ in 0..100 {
        board.tick();
        for placed in board.birds() {
            let heading = placed.occupant.heading();
            assert!((0.0..2.0 * PI).contains(&heading));
            assert!(placed.row < board.rows());
            assert!(placed.col < board.cols());
        }
        // Rendering panics on an unnormalized heading
        assert_eq!(board.render_text().lines().count(), board.rows() + 2);
    }
}

#[test]
fn config_file_drives_board() {
    let path = std::env::temp_dir().join(format!("torus-flock-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"rows": 6, "cols": 7, "birds": 3, "blocks": 2, "seed": 5, "isolation": "reset"}"#,
    )
    .unwrap();
    let config = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.isolation, Isolation::Reset);
    let board = Board::from_config(&config).unwrap();
    assert_eq!((board.rows(), board.cols()), (6, 7));
    assert_eq!(board.birds().len(), 3);
    assert_eq!(board.blocks().len(), 2);
    assert_eq!(board.to_records().len(), 5);
}

#[test]
fn missing_config_file_is_io_error() {
    let result = SimConfig::load("/definitely/not/here/torus-flock.json");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

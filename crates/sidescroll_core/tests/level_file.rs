//! Level files written by the editor and read back from disk

use serde_json::json;
use sidescroll_core::{decode, decode_str, encode, GroundRun, Level, Platform};

fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sidescroll_core_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_level_survives_disk_round_trip() {
    let mut level = Level::with_dimensions(96, 18, 32);
    for gx in 0..96 {
        level.add_ground(gx, 17, 1);
    }
    level.delete_at(40, 17);
    level.add_platform(10, 12, 4, 1);
    level.add_enemy(20, 16, "scientist");
    level.assets.bg_path = Some("D:\\art\\game\\resources\\graphics\\backgrounds\\sky.png".into());

    let path = temp_file("round_trip");
    let text = encode(&level, 42).to_json_pretty().unwrap();
    std::fs::write(&path, text).unwrap();

    let loaded = decode_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.width(), 96);
    assert_eq!(loaded.height(), 18);
    assert_eq!(
        loaded.ground_runs(),
        &[GroundRun::new(0, 17, 40), GroundRun::new(41, 17, 55)]
    );
    assert_eq!(loaded.platforms(), &[Platform::new(10, 12, 4, 1)]);
    assert_eq!(loaded.enemies()[0].kind, "scientist");
    assert_eq!(
        loaded.assets.bg_path.as_deref(),
        Some("resources/graphics/backgrounds/sky.png")
    );
}

#[test]
fn test_early_level_file_loads() {
    // Shape written by the first editor release: flat paths, no parallax or metadata
    let document = json!({
        "dimensions": {"width": 64, "height": 16, "cell_size": 32,
                       "width_pixels": 2048, "height_pixels": 512},
        "platforms": [{"x": 3, "y": 9, "width": 2, "height": 1}],
        "ground_blocks": [{"x": 0, "y": 15, "width": 64}],
        "enemies": [{"x": 8, "y": 14, "type": "armadillo"}],
        "bg_path": "/Users/dev/platformer/resources/graphics/background_2048_512.png",
        "fg_path": "/Users/dev/platformer/resources/graphics/foreground_2048_512.png"
    });

    let level = decode(&document).unwrap();
    assert_eq!(level.width_pixels(), 2048);
    assert_eq!(level.ground_runs(), &[GroundRun::new(0, 15, 64)]);
    assert_eq!(
        level.assets.bg_path.as_deref(),
        Some("resources/graphics/backgrounds/background_2048_512.png")
    );
    assert_eq!(
        level.assets.fg_path.as_deref(),
        Some("resources/graphics/backgrounds/foreground_2048_512.png")
    );
    assert_eq!(level.parallax.bg_scroll_rate, 0.2);
    assert_eq!(level.assets.enemy_kinds, vec!["armadillo"]);
}

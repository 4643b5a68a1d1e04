mod common;

use common::*;
use encplan_core::*;

const ROTATIONS: [Rotation; 4] = [
    Rotation::None,
    Rotation::Cw90,
    Rotation::Cw180,
    Rotation::Cw270,
];

fn oriented_profile(
    rotation: Rotation,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> EncodingProfile {
    EncodingProfile {
        rotation,
        flip_horizontal,
        flip_vertical,
        ..EncodingProfile::default()
    }
}

#[test]
fn test_inverse_rotation_restores_detected_crop() {
    let detected = Crop::new(10, 20, 30, 40);
    let title = SourceTitle {
        autocrop: detected,
        ..title(1920, 1080)
    };

    for rotation in ROTATIONS {
        let crop = resolve_cropping(&oriented_profile(rotation, false, false), &title);
        assert_eq!(crop.rotated(rotation.inverse()), detected, "{rotation:?}");
    }
}

#[test]
fn test_source_orientation_round_trip_with_flips() {
    let detected = Crop::new(3, 70, 12, 1);
    let title = SourceTitle {
        autocrop: detected,
        ..title(1280, 720)
    };

    for rotation in ROTATIONS {
        for (flip_horizontal, flip_vertical) in
            [(false, false), (true, false), (false, true), (true, true)]
        {
            let profile = oriented_profile(rotation, flip_horizontal, flip_vertical);
            let crop = resolve_cropping(&profile, &title);
            assert_eq!(
                crop.to_source_orientation(rotation, flip_horizontal, flip_vertical),
                detected,
                "{rotation:?} h={flip_horizontal} v={flip_vertical}"
            );
        }
    }
}

#[test]
fn test_rotation_relabels_letterbox_as_pillarbox() {
    let profile = oriented_profile(Rotation::Cw90, false, false);
    let crop = resolve_cropping(&profile, &letterboxed_feature());

    assert_eq!(crop, Crop::new(0, 0, 138, 138));
    assert_eq!(crop.horizontal(), 276);
}

#[test]
fn test_half_turn_swaps_opposite_edges() {
    let title = SourceTitle {
        autocrop: Crop::new(1, 2, 3, 4),
        ..title(1920, 1080)
    };
    let crop = resolve_cropping(&oriented_profile(Rotation::Cw180, false, false), &title);

    assert_eq!(crop, Crop::new(2, 1, 4, 3));
}

#[test]
fn test_rotated_crop_feeds_geometry() {
    // The letterbox becomes a pillarbox after a quarter turn, so the
    // rotated 1080x1920 frame loses 276 pixels of width.
    let profile = EncodingProfile {
        rotation: Rotation::Cw270,
        ..bounded_profile(2000, 2000)
    };
    let size = resolve_geometry(&profile, &letterboxed_feature(), &CoreConfig::default());

    assert_eq!((size.output_width, size.output_height), (804, 1920));
}

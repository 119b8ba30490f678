use approx::assert_abs_diff_eq;

use super::*;
use crate::mesh::Face;
use crate::point::PointExt;

fn square(mesh: &mut Mesh, half: f64, z: f64) -> WallLoop {
    WallLoop::closed(vec![
        mesh.add_xyz(-half, -half, z),
        mesh.add_xyz(half, -half, z),
        mesh.add_xyz(half, half, z),
        mesh.add_xyz(-half, half, z),
    ])
}

fn assert_point(actual: Point, expected: [f64; 3]) {
    assert!(
        actual.approx_eq(Point::from_array(expected), POINT_TOLERANCE),
        "expected {expected:?}, got {actual:?}"
    );
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn square_wall_offsets_inward() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    let expected_inner = [[-8.0, -8.0], [8.0, -8.0], [8.0, 8.0], [-8.0, 8.0]];
    for (i, [x, y]) in expected_inner.into_iter().enumerate() {
        assert_point(mesh.point(&shell.inner_top[i]).unwrap(), [x, y, 5.0]);
        assert_point(mesh.point(&shell.inner_floor[i]).unwrap(), [x, y, 0.0]);
    }
    assert_point(mesh.point(&shell.outer_floor[2]).unwrap(), [10.0, 10.0, 0.0]);

    assert_eq!(shell.face_count(), 12);
    assert!(mesh.faces().iter().all(|f| matches!(f, Face::Quad(_))));
    mesh.validate().unwrap();
}

#[test]
fn outer_skin_faces_outward() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);
    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    // first face is the outer skin of the edge along -Y
    let normal = mesh.face_normal(shell.faces.start).unwrap();
    assert_point(normal, [0.0, -1.0, 0.0]);
    // inner skin of the same edge faces the cavity
    let normal = mesh.face_normal(shell.faces.start + 1).unwrap();
    assert_point(normal, [0.0, 1.0, 0.0]);
    // floor strip faces down
    let normal = mesh.face_normal(shell.faces.start + 2).unwrap();
    assert_point(normal, [0.0, 0.0, -1.0]);
}

#[test]
fn capped_square_is_closed_solid() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);
    let params = WallParams::new(2.0).with_rim(true);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    assert_eq!(shell.face_count(), 16);
    assert!(mesh.is_watertight());
    assert!(mesh.is_consistently_wound());
    // 20 x 20 x 5 outer block minus the 16 x 16 x 5 cavity
    assert_abs_diff_eq!(mesh.signed_volume(), 720.0, epsilon = 1e-9);
}

#[test]
fn reflex_corner_mitres_inside_the_solid() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::closed(
        [
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]
        .into_iter()
        .map(|(x, y)| mesh.add_xyz(x, y, 4.0))
        .collect(),
    );
    let params = WallParams::new(2.0).with_rim(true);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    assert_point(mesh.point(&shell.inner_floor[3]).unwrap(), [8.0, 8.0, 0.0]);
    assert_point(mesh.point(&shell.inner_floor[2]).unwrap(), [18.0, 8.0, 0.0]);
    assert!(mesh.is_watertight());
    assert!(mesh.is_consistently_wound());
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn collinear_midpoint_offsets_perpendicular() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::closed(vec![
        mesh.add_xyz(-10.0, -10.0, 5.0),
        mesh.add_xyz(0.0, -10.0, 5.0),
        mesh.add_xyz(10.0, -10.0, 5.0),
        mesh.add_xyz(10.0, 10.0, 5.0),
        mesh.add_xyz(-10.0, 10.0, 5.0),
    ]);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    assert_point(mesh.point(&shell.inner_floor[1]).unwrap(), [0.0, -8.0, 0.0]);
    assert_eq!(shell.face_count(), 15);
}

#[test]
fn tilted_top_plane_sets_inner_heights() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    // top rises 0.1 per unit of x, through z = 6 at the origin
    let top = Plane::from_points(
        Point::new(0.0, 0.0, 6.0),
        Point::new(10.0, 0.0, 7.0),
        Point::new(0.0, 10.0, 6.0),
    )
    .unwrap();
    let boundary = WallLoop::closed(vec![
        mesh.add_xyz(-10.0, -10.0, 5.0),
        mesh.add_xyz(10.0, -10.0, 7.0),
        mesh.add_xyz(10.0, 10.0, 7.0),
        mesh.add_xyz(-10.0, 10.0, 5.0),
    ]);
    let params = WallParams::new(2.0).with_top(TopSurface::Plane(top)).with_rim(true);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    assert_point(mesh.point(&shell.inner_top[0]).unwrap(), [-8.0, -8.0, 5.2]);
    assert_point(mesh.point(&shell.inner_top[1]).unwrap(), [8.0, -8.0, 6.8]);
    assert!(mesh.is_watertight());
}

#[test]
fn level_top_follows_each_outer_height() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::closed(vec![
        mesh.add_xyz(-10.0, -10.0, 5.0),
        mesh.add_xyz(10.0, -10.0, 9.0),
        mesh.add_xyz(10.0, 10.0, 9.0),
        mesh.add_xyz(-10.0, 10.0, 5.0),
    ]);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    assert_abs_diff_eq!(mesh.point(&shell.inner_top[0]).unwrap().z, 5.0);
    assert_abs_diff_eq!(mesh.point(&shell.inner_top[1]).unwrap().z, 9.0);
}

#[test]
fn points_on_the_floor_are_reused() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::closed(vec![
        mesh.add_xyz(-10.0, -10.0, 0.0),
        mesh.add_xyz(10.0, -10.0, 5.0),
        mesh.add_xyz(10.0, 10.0, 5.0),
        mesh.add_xyz(-10.0, 10.0, 5.0),
    ]);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    assert_eq!(shell.outer_floor[0], shell.outer_top[0]);
    assert_eq!(shell.inner_top[0], shell.inner_floor[0]);
    // zero wall height at point 0 turns its adjacent skins into triangles
    mesh.validate().unwrap();
    let tris = mesh.faces().iter().filter(|f| matches!(f, Face::Tri(_))).count();
    assert_eq!(tris, 4);
    // no outer vertical bevel on a zero-height edge
    assert_eq!(bevels.len(), 3);
}

// =============================================================================
// Open walls
// =============================================================================

#[test]
fn open_wall_with_caps_is_closed_solid() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::open(
        vec![
            mesh.add_xyz(0.0, 0.0, 6.0),
            mesh.add_xyz(10.0, 0.0, 6.0),
            mesh.add_xyz(20.0, 5.0, 6.0),
        ],
        EndCap::Square,
        EndCap::Square,
    );
    let params = WallParams::new(1.5).with_rim(true).with_end_caps(true);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    assert_point(mesh.point(&shell.inner_floor[0]).unwrap(), [0.0, 1.5, 0.0]);
    assert_eq!(shell.face_count(), 2 * 4 + 2);
    assert!(mesh.is_watertight());
    assert!(mesh.is_consistently_wound());
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn plane_end_cap_mitres_against_neighbour() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    // the wall runs along +x and ends against the 45 degree plane x = y
    let end = Plane::from_points(
        Point::new(10.0, 10.0, 0.0),
        Point::new(0.0, 0.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    )
    .unwrap();
    let boundary = WallLoop::open(
        vec![mesh.add_xyz(-10.0, 0.0, 4.0), mesh.add_xyz(0.0, 0.0, 4.0)],
        EndCap::Square,
        EndCap::Plane(end),
    );

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    assert_point(mesh.point(&shell.inner_floor[1]).unwrap(), [2.0, 2.0, 0.0]);
}

#[test]
fn end_plane_must_pass_through_end_point() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let end = Plane::from_point_normal(Point::new(5.0, 0.0, 0.0), Point::X).unwrap();
    let boundary = WallLoop::open(
        vec![mesh.add_xyz(-10.0, 0.0, 4.0), mesh.add_xyz(0.0, 0.0, 4.0)],
        EndCap::Square,
        EndCap::Plane(end),
    );

    let err = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap_err();

    assert!(matches!(err, KernelError::InvalidBoundary { .. }));
}

#[test]
fn open_wall_without_caps_leaves_ends_open() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = WallLoop::open(
        vec![mesh.add_xyz(0.0, 0.0, 3.0), mesh.add_xyz(10.0, 0.0, 3.0)],
        EndCap::Square,
        EndCap::Square,
    );

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(1.0)).unwrap();

    assert_eq!(shell.face_count(), 3);
    assert!(!mesh.is_watertight());
}

// =============================================================================
// Bevels
// =============================================================================

#[test]
fn default_params_bevel_outer_vertical_edges() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap();

    assert_eq!(bevels.len(), 4);
    for i in 0..4 {
        assert_eq!(
            bevels.get(shell.outer_top[i].index(), shell.outer_floor[i].index()),
            Some(DEFAULT_BEVEL_WEIGHT)
        );
    }
}

#[test]
fn corner_override_replaces_class_weight() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0).with_corner_bevel(2, 0.25);
    let params = WallParams::new(2.0).with_bevels(EdgeBevels {
        outer_vertical: Some(0.5),
        inner_top: Some(0.75),
        ..EdgeBevels::none()
    });

    let shell = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    let c = shell.corner(2).unwrap();
    assert_eq!(bevels.get(c.outer_top.index(), c.outer_floor.index()), Some(0.25));
    let c = shell.corner(0).unwrap();
    assert_eq!(bevels.get(c.outer_top.index(), c.outer_floor.index()), Some(0.5));
    assert_eq!(
        bevels.get(shell.inner_top[0].index(), shell.inner_top[1].index()),
        Some(0.75)
    );
    assert_eq!(bevels.len(), 8);
}

#[test]
fn params_take_thickness_and_tolerance_from_config() {
    let config = GlobalConfig::new(1e-6, 3.5, 10).unwrap();
    let params = WallParams::from_config(&config);
    assert_eq!(params.thickness, 3.5);
    assert_eq!(params.tolerance, 1e-6);
    assert_eq!(params.floor_z, DEFAULT_FLOOR_Z);
    assert!(!params.cap_rim);
}

#[test]
fn configured_tolerance_snaps_points_to_the_floor() {
    let mut mesh = Mesh::new();
    let boundary = WallLoop::closed(vec![
        mesh.add_xyz(-10.0, -10.0, -1e-5),
        mesh.add_xyz(10.0, -10.0, 5.0),
        mesh.add_xyz(10.0, 10.0, 5.0),
        mesh.add_xyz(-10.0, 10.0, 5.0),
    ]);

    // just under the floor is rejected at the default tolerance
    let err = build_wall(&mut mesh, &mut BevelMap::new(), &boundary, &WallParams::new(2.0))
        .unwrap_err();
    assert!(matches!(err, KernelError::InvalidBoundary { .. }));

    let config = GlobalConfig::new(1e-4, 2.0, 10).unwrap();
    let params = WallParams::from_config(&config);
    let shell = build_wall(&mut mesh, &mut BevelMap::new(), &boundary, &params).unwrap();
    assert_eq!(shell.outer_floor[0], shell.outer_top[0]);
    assert_eq!(shell.inner_top[0], shell.inner_floor[0]);
}

#[test]
fn no_bevels_leaves_map_empty() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);
    let params = WallParams::new(2.0).with_bevels(EdgeBevels::none());

    build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap();

    assert!(bevels.is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn crossed_offset_is_rejected() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 2.0, 5.0);

    let err = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(3.0)).unwrap_err();

    assert_eq!(err, KernelError::CrossedOffset { segment: 0 });
}

#[test]
fn clockwise_loop_is_rejected() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let mut points = square(&mut mesh, 10.0, 5.0).points().to_vec();
    points.reverse();

    let err = build_wall(
        &mut mesh,
        &mut bevels,
        &WallLoop::closed(points),
        &WallParams::new(2.0),
    )
    .unwrap_err();

    assert!(matches!(err, KernelError::InvalidBoundary { .. }));
}

#[test]
fn failed_build_leaves_mesh_untouched() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 2.0, 5.0);
    let points_before = mesh.point_count();

    assert!(build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(3.0)).is_err());

    assert_eq!(mesh.point_count(), points_before);
    assert_eq!(mesh.face_count(), 0);
    assert!(bevels.is_empty());
}

#[test]
fn rejects_bad_parameters() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let boundary = square(&mut mesh, 10.0, 5.0);

    for params in [
        WallParams::new(0.0),
        WallParams::new(f64::NAN),
        WallParams::new(2.0).with_floor(f64::INFINITY),
        WallParams::new(2.0).with_bevels(EdgeBevels::outer_corners(1.5)),
        WallParams::new(2.0).with_tolerance(0.0),
        WallParams::new(2.0).with_tolerance(f64::NAN),
    ] {
        let err = build_wall(&mut mesh, &mut bevels, &boundary, &params).unwrap_err();
        assert!(matches!(err, KernelError::InvalidParameter { .. }), "{err:?}");
    }

    let bad_corner = boundary.clone().with_corner_bevel(9, 0.5);
    let err =
        build_wall(&mut mesh, &mut bevels, &bad_corner, &WallParams::new(2.0)).unwrap_err();
    assert!(matches!(err, KernelError::InvalidParameter { .. }));
}

#[test]
fn rejects_short_and_sunken_boundaries() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let a = mesh.add_xyz(0.0, 0.0, 5.0);
    let b = mesh.add_xyz(10.0, 0.0, 5.0);
    let sunk = mesh.add_xyz(10.0, 10.0, -1.0);
    let params = WallParams::new(1.0);

    let short = WallLoop::closed(vec![a, b]);
    let err = build_wall(&mut mesh, &mut bevels, &short, &params).unwrap_err();
    assert!(matches!(err, KernelError::InvalidBoundary { .. }));

    let sunken = WallLoop::closed(vec![a, b, sunk]);
    let err = build_wall(&mut mesh, &mut bevels, &sunken, &params).unwrap_err();
    assert!(matches!(err, KernelError::InvalidBoundary { .. }));
}

#[test]
fn repeated_point_is_degenerate() {
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();
    let a = mesh.add_xyz(0.0, 0.0, 5.0);
    let b = mesh.add_xyz(10.0, 0.0, 5.0);
    let c = mesh.add_xyz(10.0, 0.0, 5.0);
    let d = mesh.add_xyz(0.0, 10.0, 5.0);

    let err = build_wall(
        &mut mesh,
        &mut bevels,
        &WallLoop::closed(vec![a, b, c, d]),
        &WallParams::new(1.0),
    )
    .unwrap_err();

    assert!(matches!(err, KernelError::DegeneratePlane { .. }));
}

#[test]
fn boundary_from_another_mesh_is_foreign() {
    let mut other = Mesh::new();
    let boundary = square(&mut other, 10.0, 5.0);
    let mut mesh = Mesh::new();
    let mut bevels = BevelMap::new();

    let err = build_wall(&mut mesh, &mut bevels, &boundary, &WallParams::new(2.0)).unwrap_err();

    assert!(matches!(err, KernelError::ForeignPoint { .. }));
}

//! Frame lifecycle tests for debug shapes.
//!
//! Each test drives the public API the way a host engine does: shapes are
//! issued, routed into buckets, packed, and dispatched against a
//! [`RecordingBackend`].
//!
//! ```bash
//! cargo test -p redlilium-debug-shapes --test frame_tests
//! ```

use std::ops::Range;

use rstest::rstest;

use redlilium_debug_shapes::{
    BackendCall, Bucket, Color, CullMode, DebugShapeRenderer, DebugShapes, DebugShapesConfig,
    DepthMode, DrawCommand, DrawOptions, FrameState, InstancePacker, PrimitiveKind,
    QueuedShape, Quat, RecordingBackend, ShapeBuckets, ShapeQueue, Vec2, Vec3, mesh,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A command of `kind` whose position encodes `id`.
fn command(kind: PrimitiveKind, id: u32) -> DrawCommand {
    let position = Vec3::new(id as f32, 0.0, 0.0);
    let color = Color::WHITE;
    match kind {
        PrimitiveKind::Quad => DrawCommand::Quad {
            position,
            rotation: Quat::IDENTITY,
            size: Vec2::ONE,
            color,
        },
        PrimitiveKind::Circle => DrawCommand::Circle {
            position,
            rotation: Quat::IDENTITY,
            radius: 1.0,
            color,
        },
        PrimitiveKind::Line => DrawCommand::Line {
            start: position,
            end: position + Vec3::Y,
            color,
        },
        PrimitiveKind::Cube => DrawCommand::Cube {
            start: position - Vec3::splat(0.5),
            end: position + Vec3::splat(0.5),
            rotation: Quat::IDENTITY,
            color,
        },
        PrimitiveKind::Sphere => DrawCommand::Sphere {
            position,
            radius: 1.0,
            color,
        },
        PrimitiveKind::HalfSphere => DrawCommand::HalfSphere {
            position,
            rotation: Quat::IDENTITY,
            radius: 1.0,
            color,
        },
        PrimitiveKind::Capsule => DrawCommand::Capsule {
            position,
            rotation: Quat::IDENTITY,
            height: 1.0,
            radius: 0.5,
            color,
        },
        PrimitiveKind::Cylinder => DrawCommand::Cylinder {
            position,
            rotation: Quat::IDENTITY,
            height: 1.0,
            radius: 0.5,
            color,
        },
        PrimitiveKind::Cone => DrawCommand::Cone {
            position,
            rotation: Quat::IDENTITY,
            height: 1.0,
            radius: 0.5,
            color,
        },
    }
}

/// Deterministic mixed workload: `count` commands spread over every kind,
/// bucket and depth partition.
fn fill_buckets(
    buckets: &mut ShapeBuckets,
    count: u32,
    seed: u32,
) -> Vec<(Bucket, bool, DrawCommand)> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    let mut issued = Vec::new();
    for id in 0..count {
        let kind = PrimitiveKind::ALL[next() as usize % PrimitiveKind::ALL.len()];
        let bucket = Bucket::ALL[next() as usize % Bucket::ALL.len()];
        let depth_test = next() % 2 == 0;
        let command = command(kind, id);
        buckets.frame_mut(bucket).push(command, depth_test);
        issued.push((bucket, depth_test, command));
    }
    issued
}

fn packed_ranges(
    buckets: &ShapeBuckets,
    kind_filter: impl Fn(PrimitiveKind) -> bool,
) -> Vec<Range<u32>> {
    let mut ranges = Vec::new();
    for bucket in Bucket::ALL {
        let packed = buckets.frame(bucket).packed();
        for pass in [&packed.depth, &packed.no_depth] {
            for kind in PrimitiveKind::ALL {
                let range = pass.range(kind);
                if kind_filter(kind) && !range.is_empty() {
                    ranges.push(range);
                }
            }
        }
    }
    ranges
}

fn assert_tiles(mut ranges: Vec<Range<u32>>, len: usize) {
    ranges.sort_by_key(|range| range.start);
    let mut expected_start = 0;
    for range in &ranges {
        assert_eq!(range.start, expected_start, "ranges overlap or leave a gap: {ranges:?}");
        expected_start = range.end;
    }
    assert_eq!(expected_start as usize, len);
}

// ============================================================================
// Packing
// ============================================================================

#[rstest]
#[case::small(12, 1)]
#[case::medium(200, 7)]
#[case::large(3000, 42)]
fn test_packing_ranges_never_overlap(#[case] count: u32, #[case] seed: u32) {
    init_logger();
    let mut buckets = ShapeBuckets::new();
    fill_buckets(&mut buckets, count, seed);

    let mut packer = InstancePacker::new();
    buckets.extract(&mut packer);

    assert_tiles(packed_ranges(&buckets, |kind| kind.is_instanced()), packer.instances().len());
    assert_tiles(
        packed_ranges(&buckets, |kind| kind == PrimitiveKind::Line),
        packer.line_vertices().len(),
    );
}

#[rstest]
#[case::small(12, 3)]
#[case::large(1500, 9)]
fn test_packing_writes_every_command_once(#[case] count: u32, #[case] seed: u32) {
    let mut buckets = ShapeBuckets::new();
    let issued = fill_buckets(&mut buckets, count, seed);

    let mut packer = InstancePacker::new();
    let writes = buckets.extract(&mut packer);
    assert_eq!(writes.instances() + writes.lines, count);

    for (bucket, depth_test, command) in issued {
        let pass = *buckets.frame(bucket).packed().pass(depth_test);
        let kind = command.kind();
        let id = match command {
            DrawCommand::Line { start, .. } => start.x,
            DrawCommand::Cube { start, .. } => start.x + 0.5,
            DrawCommand::Quad { position, .. }
            | DrawCommand::Circle { position, .. }
            | DrawCommand::Sphere { position, .. }
            | DrawCommand::HalfSphere { position, .. }
            | DrawCommand::Capsule { position, .. }
            | DrawCommand::Cylinder { position, .. }
            | DrawCommand::Cone { position, .. } => position.x,
        };
        let range = pass.range(kind);
        let hits = if kind == PrimitiveKind::Line {
            packer.line_vertices()[range.start as usize..range.end as usize]
                .iter()
                .filter(|vertex| vertex.position[0] == id)
                .count()
        } else {
            packer.instances()[range.start as usize..range.end as usize]
                .iter()
                .filter(|instance| instance.position[0] == id)
                .count()
        };
        let expected = if kind == PrimitiveKind::Line { 2 } else { 1 };
        assert_eq!(hits, expected, "{} #{id} in {bucket:?}", kind.name());
    }
}

#[rstest]
#[case::instances_only(&[(PrimitiveKind::Cube, 3)], &[(PrimitiveKind::Sphere, 2)])]
#[case::mixed(
    &[(PrimitiveKind::Quad, 1), (PrimitiveKind::Line, 2), (PrimitiveKind::Cone, 4)],
    &[(PrimitiveKind::Quad, 5), (PrimitiveKind::Line, 1)]
)]
#[case::empty_first(&[], &[(PrimitiveKind::Capsule, 2), (PrimitiveKind::Line, 3)])]
fn test_offsets_chain_until_reset(
    #[case] first: &[(PrimitiveKind, u32)],
    #[case] second: &[(PrimitiveKind, u32)],
) {
    let fill = |frame: &mut FrameState, shapes: &[(PrimitiveKind, u32)]| {
        for &(kind, count) in shapes {
            for id in 0..count {
                frame.push(command(kind, id), true);
            }
        }
    };

    let mut packer = InstancePacker::new();
    let mut frame = FrameState::new();

    fill(&mut frame, first);
    packer.pack(&mut frame);
    let (last_offset, last_line_offset) = (packer.last_offset(), packer.last_line_offset());
    assert_eq!(frame.packed().depth.instance_end(), last_offset);

    fill(&mut frame, second);
    packer.pack(&mut frame);
    let depth = frame.packed().depth;
    assert_eq!(depth.offsets.quads, last_offset);
    assert_eq!(depth.offsets.lines, last_line_offset);

    packer.reset();
    fill(&mut frame, second);
    packer.pack(&mut frame);
    assert_eq!(frame.packed().depth.offsets.quads, 0);
    assert_eq!(frame.packed().depth.offsets.lines, 0);
}

// ============================================================================
// Meshes
// ============================================================================

#[rstest]
#[case::divides(16, 4, true)]
#[case::not_divides(16, 5, false)]
#[case::every_segment(12, 12, true)]
#[case::thirds(12, 3, true)]
#[case::seven(12, 7, false)]
#[case::more_splits_than_segments(8, 16, false)]
#[case::disabled(10, 0, true)]
fn test_circle_uv_splits_divisor(
    #[case] tessellation: u32,
    #[case] uv_splits: u32,
    #[case] ok: bool,
) {
    let result = mesh::generate_circle(0.5, tessellation, uv_splits, 0.0, false, 0);
    assert_eq!(result.is_ok(), ok, "{tessellation}/{uv_splits}");
}

#[rstest]
#[case(3)]
#[case(8)]
#[case(16)]
#[case(33)]
fn test_circle_flip_round_trip(#[case] tessellation: u32) {
    let front = mesh::generate_circle(1.0, tessellation, 0, 0.25, false, 0).unwrap();
    let back = mesh::generate_circle(1.0, tessellation, 0, 0.25, true, 0).unwrap();
    let mut reversed = front.indices.clone();
    reversed.reverse();
    assert_eq!(reversed, back.indices);
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_half_sphere_draws_lower_half_of_sphere() {
    init_logger();
    let mut renderer = DebugShapeRenderer::new(&DebugShapesConfig::default()).unwrap();
    let sphere = renderer.mesh_cache().range(PrimitiveKind::Sphere).unwrap();

    let mut buckets = ShapeBuckets::new();
    buckets
        .frame_mut(Bucket::SolidOpaque)
        .draw_half_sphere(Vec3::ZERO, Quat::IDENTITY, 1.0, Color::WHITE, true);
    let mut packer = InstancePacker::new();
    buckets.extract(&mut packer);

    let mut backend = RecordingBackend::new();
    renderer.render(&mut backend, &buckets, &packer).unwrap();

    let draws: Vec<_> = backend.draws().cloned().collect();
    assert_eq!(
        draws,
        vec![BackendCall::DrawIndexedInstanced {
            index_count: sphere.index_count / 2,
            instance_count: 1,
            index_offset: sphere.index_offset,
            vertex_offset: sphere.vertex_offset,
        }]
    );

    let culling: Vec<_> = backend
        .calls()
        .iter()
        .filter_map(|call| match call {
            BackendCall::SetPipelineState(state) => Some(state.cull),
            _ => None,
        })
        .collect();
    assert_eq!(culling, vec![CullMode::None]);

    // Every index of the slice lies in the lower hemisphere
    let start = sphere.index_offset as usize;
    let slice = &backend.mesh_indices()[start..start + (sphere.index_count / 2) as usize];
    for &index in slice {
        let vertex = backend.mesh_vertices()[(sphere.vertex_offset + index) as usize];
        assert!(vertex.position[1] <= 1e-5);
    }
}

#[test]
fn test_depth_pass_precedes_no_depth_pass() {
    let mut renderer = DebugShapeRenderer::new(&DebugShapesConfig::default()).unwrap();
    let mut buckets = ShapeBuckets::new();
    let transparent = Color::BLUE.with_alpha(128);
    let frame = buckets.frame_mut(Bucket::SolidTransparent);
    frame.draw_cube(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, transparent, false);
    frame.draw_cube(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, transparent, true);

    let mut packer = InstancePacker::new();
    buckets.extract(&mut packer);
    let mut backend = RecordingBackend::new();
    renderer.render(&mut backend, &buckets, &packer).unwrap();

    let depth_modes: Vec<_> = backend
        .calls()
        .iter()
        .filter_map(|call| match call {
            BackendCall::SetPipelineState(state) => Some(state.depth),
            _ => None,
        })
        .collect();
    assert_eq!(depth_modes, vec![DepthMode::ReadOnly, DepthMode::Off]);
}

// ============================================================================
// Persistent queue
// ============================================================================

#[test]
fn test_lifetime_decay() {
    let mut queue = ShapeQueue::new(16, 16);
    queue.push(QueuedShape::new(
        command(PrimitiveKind::Sphere, 0),
        DrawOptions::new().with_lifetime(1.5),
    ));

    let mut drawn = 0;
    queue.tick(1.0, |_| drawn += 1);
    assert_eq!(queue.timed_len(), 1);
    assert_eq!(drawn, 1);

    queue.tick(0.6, |_| drawn += 1);
    assert_eq!(queue.timed_len(), 0);

    queue.tick(0.6, |_| drawn += 1);
    assert_eq!(drawn, 2);
}

#[rstest]
#[case::hundred(100, 5)]
#[case::tiny(1, 3)]
fn test_overflow_drops_oldest(#[case] max: usize, #[case] extra: usize) {
    let config = DebugShapesConfig::default().with_max_primitives_with_lifetime(max);
    let shapes = DebugShapes::new(&config);
    {
        let mut ctx = shapes.context();
        ctx.set_options(DrawOptions::new().with_lifetime(10.0));
        for id in 0..max + extra {
            ctx.push(command(PrimitiveKind::Sphere, id as u32));
        }
    }
    assert_eq!(shapes.timed_len(), max);

    let mut buckets = ShapeBuckets::new();
    shapes.update(0.0, &mut buckets);
    let retained: Vec<f32> = buckets
        .frame(Bucket::SolidOpaque)
        .commands(true)
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::Sphere { position, .. } => position.x,
            _ => panic!("only spheres were queued"),
        })
        .collect();
    let expected: Vec<f32> = (extra..max + extra).map(|id| id as f32).collect();
    assert_eq!(retained, expected);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_end_to_end_frame() {
    init_logger();
    let config = DebugShapesConfig::default();
    let shapes = DebugShapes::new(&config);
    {
        let mut ctx = shapes.context();
        for i in 0..3 {
            let min = Vec3::new(i as f32 * 2.0, 0.0, 0.0);
            ctx.draw_cube(min, min + Vec3::ONE, Quat::IDENTITY, Color::GREEN);
        }
        ctx.draw_line(Vec3::ZERO, Vec3::Y, Color::RED);
        ctx.draw_line(Vec3::ZERO, Vec3::Z, Color::RED);

        ctx.set_options(DrawOptions::new().with_depth_test(false));
        ctx.draw_sphere(Vec3::new(0.0, 3.0, 0.0), 1.0, Color::WHITE.with_alpha(128));
    }

    let mut buckets = ShapeBuckets::new();
    shapes.update(1.0 / 60.0, &mut buckets);
    let mut packer = InstancePacker::new();
    let writes = buckets.extract(&mut packer);

    assert_eq!(writes.instances(), 4);
    assert_eq!(packer.instances().len(), 4);
    assert_eq!(packer.line_vertices().len(), 4);

    let opaque = buckets.frame(Bucket::SolidOpaque).packed();
    assert_eq!(opaque.depth.counts.cubes, 3);
    assert_eq!(opaque.depth.counts.lines, 2);
    assert_eq!(opaque.no_depth.counts.spheres, 0);

    let transparent = buckets.frame(Bucket::SolidTransparent).packed();
    assert_eq!(transparent.no_depth.counts.spheres, 1);
    assert_eq!(transparent.depth.counts.instances(), 0);
    assert_ne!(
        transparent.no_depth.range(PrimitiveKind::Sphere),
        opaque.depth.range(PrimitiveKind::Cube)
    );

    let mut renderer = DebugShapeRenderer::new(&config).unwrap();
    let mut backend = RecordingBackend::new();
    let stats = renderer.render(&mut backend, &buckets, &packer).unwrap();
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(stats.instances, 4);
    assert_eq!(stats.line_vertices, 4);
    assert_eq!(backend.instances().len(), 4);
}

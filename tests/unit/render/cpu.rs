use super::*;
use crate::foundation::core::{Point, Rgba8};

fn dot(x: f64, y: f64, radius: f64, color: Rgba8) -> Dot {
    Dot {
        center: Point::new(x, y),
        radius,
        color,
    }
}

fn alpha_at(frame: &FrameRGBA, x: u32, y: u32) -> u8 {
    frame.data[((y * frame.width + x) * 4 + 3) as usize]
}

#[test]
fn zero_area_viewports_yield_no_surface() {
    assert!(CpuSurface::new(Viewport::new(0, 600)).is_none());
    assert!(CpuSurface::new(Viewport::new(800, 0)).is_none());
    assert!(CpuSurface::new(Viewport::new(0, 0)).is_none());
}

#[test]
fn dimensions_beyond_the_raster_limit_yield_no_surface() {
    assert!(CpuSurface::new(Viewport::new(70_000, 100)).is_none());
    assert!(CpuSurface::new(Viewport::new(100, 70_000)).is_none());
}

#[test]
fn fresh_surface_is_fully_transparent() {
    let surface = CpuSurface::new(Viewport::new(16, 16)).unwrap();
    assert_eq!(surface.viewport(), Viewport::new(16, 16));
    let frame = surface.readback_rgba8();
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn fade_multiplies_every_premultiplied_channel() {
    let mut surface = CpuSurface::new(Viewport::new(2, 1)).unwrap();
    surface.trail.data_as_u8_slice_mut()[..4].copy_from_slice(&[100, 100, 100, 255]);

    surface.fade(0.1);

    // keep = round((1 - 0.1f32) * 255) = 229
    let frame = surface.readback_rgba8();
    assert_eq!(&frame.data[..4], &[90, 90, 90, 229]);
    // Untouched transparent pixels stay transparent.
    assert_eq!(&frame.data[4..], &[0, 0, 0, 0]);
}

#[test]
fn fade_zero_changes_nothing() {
    let mut surface = CpuSurface::new(Viewport::new(1, 1)).unwrap();
    surface.trail.data_as_u8_slice_mut().copy_from_slice(&[10, 20, 30, 255]);
    surface.fade(0.0);
    assert_eq!(surface.readback_rgba8().data, vec![10, 20, 30, 255]);
}

#[test]
fn fade_one_clears_the_trail() {
    let mut surface = CpuSurface::new(Viewport::new(1, 1)).unwrap();
    surface.trail.data_as_u8_slice_mut().copy_from_slice(&[10, 20, 30, 255]);
    surface.fade(1.0);
    assert_eq!(surface.readback_rgba8().data, vec![0, 0, 0, 0]);
}

#[test]
fn repeated_fades_decay_toward_transparency() {
    // Fixed-point arithmetic stalls near zero (the rounding fixed point is 4),
    // matching the faint residue a repeated fractional fade leaves behind.
    let mut surface = CpuSurface::new(Viewport::new(1, 1)).unwrap();
    surface.trail.data_as_u8_slice_mut().copy_from_slice(&[255, 255, 255, 255]);
    for _ in 0..200 {
        surface.fade(0.1);
    }
    assert!(surface.readback_rgba8().data.iter().all(|&b| b <= 4));
}

#[test]
fn drawn_dot_lands_at_its_center() {
    let mut surface = CpuSurface::new(Viewport::new(32, 32)).unwrap();
    surface
        .draw_dots(&[dot(10.0, 10.0, 4.0, Rgba8::opaque(255, 0, 0))])
        .unwrap();

    let frame = surface.readback_rgba8();
    assert!(alpha_at(&frame, 10, 10) > 0);
    // Far corner stays untouched.
    assert_eq!(alpha_at(&frame, 31, 31), 0);
}

#[test]
fn dots_accumulate_across_draw_calls() {
    let mut surface = CpuSurface::new(Viewport::new(32, 32)).unwrap();
    surface
        .draw_dots(&[dot(8.0, 8.0, 3.0, Rgba8::opaque(255, 0, 0))])
        .unwrap();
    surface
        .draw_dots(&[dot(24.0, 24.0, 3.0, Rgba8::opaque(0, 0, 255))])
        .unwrap();

    let frame = surface.readback_rgba8();
    assert!(alpha_at(&frame, 8, 8) > 0);
    assert!(alpha_at(&frame, 24, 24) > 0);
}

#[test]
fn empty_draw_call_is_a_no_op() {
    let mut surface = CpuSurface::new(Viewport::new(8, 8)).unwrap();
    surface.draw_dots(&[]).unwrap();
    assert!(surface.readback_rgba8().data.iter().all(|&b| b == 0));
}

#[test]
fn resize_discards_previous_content() {
    let mut surface = CpuSurface::new(Viewport::new(32, 32)).unwrap();
    surface
        .draw_dots(&[dot(10.0, 10.0, 4.0, Rgba8::opaque(255, 0, 0))])
        .unwrap();

    surface.resize(Viewport::new(16, 16)).unwrap();

    assert_eq!(surface.viewport(), Viewport::new(16, 16));
    assert!(surface.readback_rgba8().data.iter().all(|&b| b == 0));
}

#[test]
fn resize_to_same_size_keeps_content() {
    let mut surface = CpuSurface::new(Viewport::new(32, 32)).unwrap();
    surface
        .draw_dots(&[dot(10.0, 10.0, 4.0, Rgba8::opaque(255, 0, 0))])
        .unwrap();

    surface.resize(Viewport::new(32, 32)).unwrap();
    assert!(alpha_at(&surface.readback_rgba8(), 10, 10) > 0);
}

#[test]
fn resize_to_zero_area_is_an_error() {
    let mut surface = CpuSurface::new(Viewport::new(8, 8)).unwrap();
    let err = surface.resize(Viewport::new(0, 8)).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn premul_over_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(premul_over_in_place(&mut dst, &[0u8; 4]).is_err());
    let mut odd = vec![0u8; 6];
    assert!(premul_over_in_place(&mut odd, &[0u8; 6]).is_err());
}

#[test]
fn premul_over_skips_transparent_source_pixels() {
    let mut dst = vec![10u8, 20, 30, 40];
    premul_over_in_place(&mut dst, &[99, 99, 99, 0]).unwrap();
    assert_eq!(dst, [10, 20, 30, 40]);
}

#[test]
fn premul_over_with_opaque_source_replaces_destination() {
    let mut dst = vec![10u8, 20, 30, 40];
    premul_over_in_place(&mut dst, &[200, 100, 50, 255]).unwrap();
    assert_eq!(dst, [200, 100, 50, 255]);
}

#[test]
fn premul_over_blends_partial_coverage() {
    // src alpha 128: dst contribution scaled by 127/255.
    let mut dst = vec![255u8, 0, 0, 255];
    premul_over_in_place(&mut dst, &[0, 64, 0, 128]).unwrap();
    assert_eq!(dst, [127, 64, 0, 255]);
}

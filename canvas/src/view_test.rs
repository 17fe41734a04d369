#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn measure_single_line() {
    let size = measure_text("abcd", 10);
    assert!(approx(size.width, 24.0));
    assert!(approx(size.height, 12.0));
}

#[test]
fn measure_uses_widest_line() {
    let size = measure_text("ab\nabcdef\nabc", 10);
    assert!(approx(size.width, 36.0));
    assert!(approx(size.height, 36.0));
}

#[test]
fn measure_empty_text_keeps_one_line_height() {
    let size = measure_text("", 20);
    assert_eq!(size.width, 0.0);
    assert!(approx(size.height, 24.0));
}

#[test]
fn create_handle_adds_blank_element() {
    let mut s = HeadlessSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = uuid::Uuid::new_v4();
    let _handle = s.create_handle(id);
    let el = s.element(id).unwrap();
    assert_eq!(el.text, "");
    assert!(!el.active);
    assert_eq!(s.element_count(), 1);
}

#[test]
fn handle_bounds_are_page_relative() {
    let mut s = HeadlessSurface::new(Rect::new(100.0, 50.0, 500.0, 400.0));
    let mut handle = s.create_handle(uuid::Uuid::new_v4());
    handle.set_text("abcd");
    handle.set_font_size(10);
    handle.set_position(Point::new(20.0, 30.0));
    let b = handle.bounds();
    assert_eq!(b.origin, Point::new(120.0, 80.0));
    assert!(approx(b.size.width, 24.0));
}

#[test]
fn handle_bounds_follow_container_moves() {
    let mut s = HeadlessSurface::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    let mut handle = s.create_handle(uuid::Uuid::new_v4());
    handle.set_position(Point::new(10.0, 10.0));
    s.set_container(Rect::new(40.0, 40.0, 500.0, 400.0));
    assert_eq!(handle.bounds().origin, Point::new(50.0, 50.0));
}

#[test]
fn dropping_handle_removes_element() {
    let mut s = HeadlessSurface::new(Rect::default());
    let id = uuid::Uuid::new_v4();
    let handle = s.create_handle(id);
    drop(handle);
    assert!(s.element(id).is_none());
    assert_eq!(s.element_count(), 0);
}

#[test]
fn clones_share_one_view() {
    let s = HeadlessSurface::new(Rect::default());
    let mut editor_side = s.clone();
    let id = uuid::Uuid::new_v4();
    let _handle = editor_side.create_handle(id);
    assert!(s.element(id).is_some());

    let image = ImageGeometry::new(Rect::new(0.0, 0.0, 500.0, 300.0), 1000.0, 600.0);
    s.set_image(image);
    assert_eq!(editor_side.image(), image);
}

#[test]
fn default_image_is_not_loaded() {
    let s = HeadlessSurface::new(Rect::default());
    assert!(!s.image().is_loaded());
}

use super::*;

#[test]
fn allocate_is_transparent_and_sized() {
    let s = Surface::allocate(7, 3, &SurfaceLimits::default()).unwrap();
    assert_eq!(s.size(), (7, 3));
    assert_eq!(s.data().len(), 7 * 3 * 4);
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.pixel(6, 2), Some(Rgba8Premul::transparent()));
    assert_eq!(s.pixel(7, 0), None);
    assert_eq!(s.pixel(0, 3), None);
}

#[test]
fn allocate_rejects_oversized_requests() {
    let err = Surface::allocate(70_000, 4, &SurfaceLimits::default()).unwrap_err();
    assert!(matches!(err, CardError::Allocation { width: 70_000, .. }));

    let limits = SurfaceLimits {
        max_side: u32::MAX,
        max_bytes: usize::MAX,
    };
    let err = Surface::allocate(65_536, 1, &limits).unwrap_err();
    assert!(err.to_string().contains("width exceeds u16"));

    let tight = SurfaceLimits {
        max_side: 1024,
        max_bytes: 16 * 16 * 4 - 1,
    };
    assert!(Surface::allocate(16, 16, &tight).is_err());
    assert!(Surface::allocate(15, 16, &tight).is_ok());
}

#[test]
fn allocate_rejects_zero_area() {
    assert!(Surface::allocate(0, 4, &SurfaceLimits::default()).is_err());
    assert!(Surface::allocate(4, 0, &SurfaceLimits::default()).is_err());
}

#[test]
fn clear_resets_pixels() {
    let mut s = Surface::allocate(2, 2, &SurfaceLimits::default()).unwrap();
    s.pixmap_mut().data_as_u8_slice_mut().fill(200);
    assert_eq!(s.pixel(1, 1).unwrap().a, 200);
    s.clear();
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let mut s = Surface::allocate(1, 1, &SurfaceLimits::default()).unwrap();
    s.pixmap_mut()
        .data_as_u8_slice_mut()
        .copy_from_slice(&[64, 0, 0, 128]);
    let img = s.to_rgba_image();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}

#[test]
fn slot_release_is_idempotent() {
    let mut slot = SurfaceSlot::default();
    assert!(!slot.release());

    slot.replace(4, 4, &SurfaceLimits::default()).unwrap();
    assert!(slot.release());
    assert!(!slot.release());

    let st = slot.stats();
    assert_eq!(st.allocations, 1);
    assert_eq!(st.releases, 1);
    assert_eq!(st.live, 0);
}

#[test]
fn slot_replace_never_holds_two_surfaces() {
    let mut slot = SurfaceSlot::default();
    let limits = SurfaceLimits::default();
    slot.replace(4, 4, &limits).unwrap();
    slot.replace(8, 2, &limits).unwrap();
    slot.replace(3, 3, &limits).unwrap();

    let st = slot.stats();
    assert_eq!(slot.size(), Some((3, 3)));
    assert_eq!(st.allocations, 3);
    assert_eq!(st.releases, 2);
    assert_eq!(st.live, 1);
    assert_eq!(st.peak_live, 1);
}

#[test]
fn slot_is_empty_after_failed_replace() {
    let mut slot = SurfaceSlot::default();
    let limits = SurfaceLimits::default();
    slot.replace(4, 4, &limits).unwrap();
    assert!(slot.replace(100_000, 4, &limits).is_err());
    assert!(slot.get().is_none());
    assert_eq!(slot.stats().live, 0);
    assert_eq!(slot.stats().releases, 1);
}

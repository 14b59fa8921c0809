use super::*;
use crate::pad::pad::DisplayInfo;

fn pad(viewport: (f64, f64)) -> Rc<RefCell<Pad>> {
    Rc::new(RefCell::new(Pad::new(
        PadConfig::default(),
        DisplayInfo::default(),
        viewport,
    )))
}

#[test]
fn notifications_are_debounced() {
    let mut d = ResizeDispatcher::new(Duration::from_millis(50));
    let p = pad((10.0, 10.0));
    d.register(&p);

    let t0 = Instant::now();
    d.notify((20.0, 20.0), t0);
    d.notify((30.0, 30.0), t0 + Duration::from_millis(40));
    assert_eq!(d.poll(t0 + Duration::from_millis(60)), 0);
    assert_eq!(p.borrow().surface().width(), 10);

    assert_eq!(d.poll(t0 + Duration::from_millis(90)), 1);
    assert_eq!(p.borrow().surface().width(), 30);
    assert!(!d.is_pending());
    assert_eq!(d.poll(t0 + Duration::from_millis(200)), 0);
}

#[test]
fn time_until_due_counts_down() {
    let mut d = ResizeDispatcher::new(Duration::from_millis(50));
    let t0 = Instant::now();
    assert_eq!(d.time_until_due(t0), None);
    d.notify((1.0, 1.0), t0);
    assert_eq!(
        d.time_until_due(t0 + Duration::from_millis(20)),
        Some(Duration::from_millis(30))
    );
    assert_eq!(
        d.time_until_due(t0 + Duration::from_millis(80)),
        Some(Duration::ZERO)
    );
}

#[test]
fn dropped_and_deregistered_pads_are_not_touched() {
    let mut d = ResizeDispatcher::from_config(&PadConfig::default());
    assert_eq!(d.debounce(), Duration::from_millis(50));
    let kept = pad((10.0, 10.0));
    let removed = pad((10.0, 10.0));
    let id = d.register(&kept);
    let removed_id = d.register(&removed);
    {
        let dropped = pad((10.0, 10.0));
        d.register(&dropped);
    }
    assert_eq!(d.live_count(), 2);
    assert!(d.deregister(removed_id));
    assert!(!d.deregister(removed_id));

    let t0 = Instant::now();
    d.notify((40.0, 40.0), t0);
    assert_eq!(d.poll(t0 + Duration::from_millis(50)), 1);
    assert_eq!(kept.borrow().surface().width(), 40);
    assert_eq!(removed.borrow().surface().width(), 10);
    assert!(d.deregister(id));
}

#[test]
fn zero_width_viewport_skips_pads() {
    let mut d = ResizeDispatcher::new(Duration::from_millis(0));
    let p = pad((10.0, 10.0));
    d.register(&p);
    let t0 = Instant::now();
    d.notify((0.0, 40.0), t0);
    assert_eq!(d.poll(t0), 0);
    assert_eq!(p.borrow().surface().width(), 10);
}

#[test]
fn borrowed_pad_is_skipped() {
    let mut d = ResizeDispatcher::new(Duration::from_millis(0));
    let p = pad((10.0, 10.0));
    d.register(&p);
    let t0 = Instant::now();
    d.notify((20.0, 20.0), t0);
    let guard = p.borrow_mut();
    assert_eq!(d.poll(t0), 0);
    drop(guard);
    assert_eq!(p.borrow().surface().width(), 10);
}

use super::*;

fn down(button: MouseButton) -> InputEvent {
    InputEvent::MouseDown {
        button,
        x: 1.0,
        y: 2.0,
        time_ms: 0,
    }
}

fn mv() -> InputEvent {
    InputEvent::MouseMove {
        x: 3.0,
        y: 4.0,
        time_ms: 5,
    }
}

#[test]
fn only_primary_button_starts_a_stroke() {
    let mut f = InputFilter::default();
    assert_eq!(f.route(down(MouseButton::Secondary)).0, StrokeAction::Ignore);
    assert!(!f.button_down());
    assert_eq!(
        f.route(down(MouseButton::Primary)).0,
        StrokeAction::Begin(SamplePoint::new(1.0, 2.0, 0))
    );
    assert!(f.button_down());
}

#[test]
fn mouse_move_requires_held_button() {
    let mut f = InputFilter::default();
    assert_eq!(f.route(mv()).0, StrokeAction::Ignore);
    f.route(down(MouseButton::Primary));
    assert_eq!(
        f.route(mv()).0,
        StrokeAction::Update(SamplePoint::new(3.0, 4.0, 5))
    );
}

#[test]
fn mouse_up_ends_only_an_active_stroke() {
    let mut f = InputFilter::default();
    let up = InputEvent::MouseUp {
        button: MouseButton::Primary,
        time_ms: 9,
    };
    assert_eq!(f.route(up).0, StrokeAction::Ignore);
    f.route(down(MouseButton::Primary));
    let other_up = InputEvent::MouseUp {
        button: MouseButton::Middle,
        time_ms: 9,
    };
    assert_eq!(f.route(other_up).0, StrokeAction::Ignore);
    assert_eq!(f.route(up).0, StrokeAction::End);
    assert!(!f.button_down());
    assert_eq!(f.route(mv()).0, StrokeAction::Ignore);
}

#[test]
fn multi_touch_start_is_ignored() {
    let mut f = InputFilter::default();
    let two = InputEvent::TouchStart {
        target_touches: 2,
        x: 0.0,
        y: 0.0,
        time_ms: 0,
    };
    assert_eq!(f.route(two).0, StrokeAction::Ignore);
    let one = InputEvent::TouchStart {
        target_touches: 1,
        x: 0.0,
        y: 0.0,
        time_ms: 0,
    };
    assert!(matches!(f.route(one).0, StrokeAction::Begin(_)));
}

#[test]
fn touch_move_always_suppresses_default() {
    let mut f = InputFilter::default();
    let (action, prevent) = f.route(InputEvent::TouchMove {
        x: 1.0,
        y: 1.0,
        time_ms: 1,
    });
    assert!(matches!(action, StrokeAction::Update(_)));
    assert!(prevent);
}

#[test]
fn touch_end_off_surface_is_ignored() {
    let mut f = InputFilter::default();
    assert_eq!(
        f.route(InputEvent::TouchEnd {
            on_surface: false,
            time_ms: 0
        }),
        (StrokeAction::Ignore, false)
    );
    assert_eq!(
        f.route(InputEvent::TouchEnd {
            on_surface: true,
            time_ms: 0
        }),
        (StrokeAction::End, true)
    );
}

#[test]
fn events_deserialize_from_tagged_json() {
    let ev: InputEvent =
        serde_json::from_str(r#"{"type":"mouse_down","button":"primary","x":1,"y":2,"time_ms":3}"#)
            .unwrap();
    assert_eq!(
        ev,
        InputEvent::MouseDown {
            button: MouseButton::Primary,
            x: 1.0,
            y: 2.0,
            time_ms: 3
        }
    );
}

use std::{cell::Cell, rc::Rc};

use omplayer_common_telemetry::init_default_ut_logging;
use omplayer_controls::{
    Error, MediaElement, MediaHandle, MediaKind, VOLUME_CHANGE_EVENT, VolumeControl,
    VolumeControlConfig,
};
use omplayer_dom::{Document, Event, EventListener, RenderContext};
use test_case::test_case;

struct Fixture {
    document: Document,
    media:    Rc<MediaElement>,
    control:  VolumeControl,
}

impl Fixture {
    fn new(volume: f64) -> Self { Self::with_config(volume, VolumeControlConfig::default()) }

    fn with_config(volume: f64, config: VolumeControlConfig) -> Self {
        init_default_ut_logging();
        let document = Document::new();
        let media = Rc::new(MediaElement::new(&document, MediaKind::Audio));
        media.set_volume(volume);
        let control = VolumeControl::new(&document, media.clone(), config).unwrap();
        Self {
            document,
            media,
            control,
        }
    }

    fn registered(volume: f64) -> Self {
        let mut fixture = Self::new(volume);
        fixture.control.register();
        fixture
    }

    fn slide(&self, kind: &str, value: &str) {
        let slider = self.control.slider();
        slider.set_value(value);
        slider.dispatch_event(Event::trusted(kind));
    }

    fn aria_text(&self) -> Option<String> { self.control.slider().attribute("aria-valuetext") }

    fn aria_now(&self) -> Option<String> { self.control.slider().attribute("aria-valuenow") }
}

fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn test_construction_markup() {
    let fixture = Fixture::new(0.5);
    let container = fixture.document.create_element("div");
    fixture.control.build(&container).unwrap();

    assert_eq!(
        container.outer_html(),
        concat!(
            "<div>",
            r#"<button type="button" class="om-controls__mute"><span class="om-sr">Mute</span></button>"#,
            r#"<input type="range" class="om-controls__volume" min="0" aria-valuemin="0" max="1" aria-valuemax="1" step="0.1" aria-valuetext="50%">"#,
            "</div>"
        )
    );
    assert_eq!(fixture.control.slider().value(), "0.5");
    assert!(approx(fixture.control.saved_volume(), 0.5));
    assert_eq!(fixture.control.button().text_content(), "Mute");
}

#[test_case(0.0, "0%" ; "silent")]
#[test_case(0.3, "30%" ; "thirty")]
#[test_case(0.75, "75%" ; "three quarters")]
#[test_case(0.456, "45%" ; "rounded down")]
#[test_case(1.0, "100%" ; "full")]
fn test_initial_aria_text_is_floored_percentage(volume: f64, expected: &str) {
    let fixture = Fixture::new(volume);
    assert_eq!(fixture.aria_text().as_deref(), Some(expected));
}

#[test_case("input", "0" ; "input silent")]
#[test_case("input", "0.3" ; "input thirty")]
#[test_case("input", "0.65" ; "input off step")]
#[test_case("change", "1" ; "change full")]
#[test_case("change", "0.8" ; "change eighty")]
fn test_slider_sets_volume_and_saved_volume(kind: &str, value: &str) {
    let fixture = Fixture::registered(0.5);
    let expected: f64 = value.parse().unwrap();

    fixture.slide(kind, value);

    assert!(approx(fixture.media.volume(), expected));
    assert!(approx(fixture.control.saved_volume(), expected));
}

#[test]
fn test_mute_click_round_trip() {
    let fixture = Fixture::registered(0.6);
    let button = fixture.control.button();

    button.click();
    assert!(fixture.media.muted());
    assert!(approx(fixture.media.volume(), 0.0));
    assert!(approx(fixture.control.saved_volume(), 0.6));
    assert_eq!(fixture.aria_text().as_deref(), Some("0%"));

    button.click();
    assert!(!fixture.media.muted());
    assert!(approx(fixture.media.volume(), 0.6));
    assert_eq!(fixture.control.slider().value(), "0.6");
    assert_eq!(fixture.aria_now().as_deref(), Some("60"));
}

#[test]
fn test_unmute_restores_last_slider_value() {
    let fixture = Fixture::registered(1.0);
    fixture.slide("input", "0.4");

    fixture.control.button().click();
    fixture.control.button().click();

    assert!(approx(fixture.media.volume(), 0.4));
}

#[test]
fn test_external_volumechange_updates_slider() {
    let fixture = Fixture::registered(0.5);

    fixture.media.set_volume(0.25);
    fixture
        .media
        .element()
        .dispatch_event(Event::new(VOLUME_CHANGE_EVENT));

    assert_eq!(fixture.control.slider().value(), "0.25");
    assert_eq!(fixture.aria_now().as_deref(), Some("25"));
    assert_eq!(fixture.aria_text().as_deref(), Some("25%"));
    assert!(approx(fixture.control.saved_volume(), 0.5));
}

#[test]
fn test_build_appends_button_then_slider() {
    let fixture = Fixture::new(0.5);
    let container = fixture.document.create_element("div");

    fixture.control.build(&container).unwrap();

    assert_eq!(
        container.children(),
        vec![
            fixture.control.button().clone(),
            fixture.control.slider().clone()
        ]
    );
}

#[test]
fn test_build_again_moves_instead_of_duplicating() {
    let fixture = Fixture::new(0.5);
    let first = fixture.document.create_element("div");
    let body = fixture.document.body();

    fixture.control.build(&first).unwrap();
    fixture.control.build(body).unwrap();
    fixture.control.build(body).unwrap();

    assert!(first.children().is_empty());
    assert_eq!(body.children().len(), 2);
    assert_eq!(&body.children()[0], fixture.control.button());
}

#[test]
fn test_build_into_own_button_fails() {
    let fixture = Fixture::new(0.5);
    let err = fixture
        .control
        .build(fixture.control.button())
        .err()
        .expect("button cannot contain itself");
    assert!(matches!(err, Error::Dom { .. }));
}

#[test]
fn test_round_trip_is_stable_under_repeated_input() {
    let fixture = Fixture::registered(0.5);

    for _ in 0..3 {
        fixture.slide("input", "0.3");
        assert!(approx(fixture.media.volume(), 0.3));
        assert_eq!(fixture.control.slider().value(), "0.3");
        assert_eq!(fixture.aria_text().as_deref(), Some("30%"));
    }
}

#[test]
fn test_other_listeners_observe_synthetic_volumechange() {
    let fixture = Fixture::registered(0.5);
    let seen = Rc::new(Cell::new(0));
    let counter = Rc::clone(&seen);
    fixture.media.element().add_event_listener(
        VOLUME_CHANGE_EVENT,
        &EventListener::new(move |event| {
            assert!(!event.is_trusted());
            counter.set(counter.get() + 1);
        }),
    );

    fixture.slide("input", "0.2");
    fixture.control.button().click();

    assert_eq!(seen.get(), 2);
}

#[test]
fn test_unregister_removes_every_listener() {
    let mut fixture = Fixture::registered(0.5);
    let media_element = fixture.media.element();
    assert_eq!(media_element.listener_count(VOLUME_CHANGE_EVENT), 1);
    assert!(fixture.control.is_registered());

    fixture.control.unregister();

    assert!(!fixture.control.is_registered());
    assert_eq!(media_element.listener_count(VOLUME_CHANGE_EVENT), 0);
    assert_eq!(fixture.control.slider().listener_count("input"), 0);
    assert_eq!(fixture.control.slider().listener_count("change"), 0);
    assert_eq!(fixture.control.button().listener_count("click"), 0);

    fixture.slide("input", "0.1");
    fixture.control.button().click();
    assert!(approx(fixture.media.volume(), 0.5));
    assert!(!fixture.media.muted());

    fixture.media.set_volume(0.9);
    media_element.dispatch_event(Event::new(VOLUME_CHANGE_EVENT));
    assert_eq!(fixture.control.slider().value(), "0.1");
}

#[test]
fn test_unregister_leaves_foreign_listeners_alone() {
    let mut fixture = Fixture::registered(0.5);
    let foreign = EventListener::new(|_| {});
    fixture
        .media
        .element()
        .add_event_listener(VOLUME_CHANGE_EVENT, &foreign);

    fixture.control.unregister().unregister();

    assert_eq!(
        fixture.media.element().listener_count(VOLUME_CHANGE_EVENT),
        1
    );
}

#[test]
fn test_register_twice_double_registers_and_unregister_clears_both() {
    let mut fixture = Fixture::new(0.5);
    fixture.control.register().register();

    let media_element = fixture.media.element();
    assert_eq!(media_element.listener_count(VOLUME_CHANGE_EVENT), 2);
    assert_eq!(fixture.control.button().listener_count("click"), 2);

    // Two click listeners: mute then unmute within one click.
    fixture.control.button().click();
    assert!(!fixture.media.muted());

    fixture.control.unregister();
    assert_eq!(media_element.listener_count(VOLUME_CHANGE_EVENT), 0);
    assert_eq!(fixture.control.button().listener_count("click"), 0);
}

#[test]
fn test_drop_detaches_from_media() {
    let document = Document::new();
    let media = Rc::new(MediaElement::new(&document, MediaKind::Video));
    {
        let mut control = VolumeControl::with_defaults(&document, media.clone()).unwrap();
        control.register();
        assert_eq!(media.element().listener_count(VOLUME_CHANGE_EVENT), 1);
    }
    assert_eq!(media.element().listener_count(VOLUME_CHANGE_EVENT), 0);
}

#[test]
fn test_sliding_while_muted_keeps_muted_flag_by_default() {
    let fixture = Fixture::registered(0.5);
    fixture.control.button().click();

    fixture.slide("input", "0.7");

    assert!(fixture.media.muted());
    assert!(approx(fixture.media.volume(), 0.7));
    assert!(approx(fixture.control.saved_volume(), 0.7));
}

#[test]
fn test_sliding_while_muted_can_unmute() {
    let config = VolumeControlConfig::builder().unmute_on_input(true).build();
    let mut fixture = Fixture::with_config(0.5, config);
    fixture.control.register();
    fixture.control.button().click();

    fixture.slide("change", "0.7");

    assert!(!fixture.media.muted());
    assert!(approx(fixture.media.volume(), 0.7));
}

#[test_case("loud" ; "word")]
#[test_case("" ; "empty")]
#[test_case("NaN" ; "nan")]
fn test_unparsable_slider_value_is_ignored(value: &str) {
    let fixture = Fixture::registered(0.5);

    fixture.slide("input", value);

    assert!(approx(fixture.media.volume(), 0.5));
    assert!(approx(fixture.control.saved_volume(), 0.5));
}

#[test]
fn test_out_of_range_slider_value_is_clamped() {
    let fixture = Fixture::registered(0.5);

    fixture.slide("input", "1.5");

    assert!(approx(fixture.media.volume(), 1.0));
    assert_eq!(fixture.control.slider().value(), "1");
}

#[test]
fn test_programmatic_api_matches_user_input() {
    let fixture = Fixture::registered(0.5);

    fixture.control.set_volume(0.2).unwrap();
    assert_eq!(fixture.aria_text().as_deref(), Some("20%"));

    assert!(fixture.control.toggle_mute());
    assert!(approx(fixture.media.volume(), 0.0));
    assert!(!fixture.control.toggle_mute());
    assert!(approx(fixture.media.volume(), 0.2));
}

#[test]
fn test_sync_without_event() {
    let fixture = Fixture::new(0.5);
    fixture.media.set_volume(0.9);

    fixture.control.sync();

    assert_eq!(fixture.control.slider().value(), "0.9");
    assert_eq!(fixture.aria_now().as_deref(), Some("90"));
}

#[test]
fn test_custom_labels_and_step() {
    let config = VolumeControlConfig::builder()
        .mute_label("Stumm")
        .step(0.05)
        .build();
    let fixture = Fixture::with_config(0.5, config);

    assert_eq!(fixture.control.button().text_content(), "Stumm");
    assert_eq!(
        fixture.control.slider().attribute("step").as_deref(),
        Some("0.05")
    );
    assert_eq!(fixture.control.config().mute_label, "Stumm");
}

struct OutOfRangeMedia {
    element: omplayer_dom::Element,
}

impl MediaHandle for OutOfRangeMedia {
    fn volume(&self) -> f64 { 1.5 }

    fn set_volume(&self, _volume: f64) {}

    fn muted(&self) -> bool { false }

    fn set_muted(&self, _muted: bool) {}

    fn element(&self) -> omplayer_dom::Element { self.element.clone() }
}

#[test]
fn test_invalid_media_fails_fast() {
    let document = Document::new();
    let media = Rc::new(OutOfRangeMedia {
        element: document.create_element("audio"),
    });

    let result = VolumeControl::with_defaults(&document, media);

    assert!(matches!(result, Err(Error::InvalidVolume { .. })));
}

#[test]
fn test_invalid_step_fails_fast() {
    let document = Document::new();
    let media = Rc::new(MediaElement::new(&document, MediaKind::Audio));
    let config = VolumeControlConfig::builder().step(0.0).build();

    let result = VolumeControl::new(&document, media, config);

    assert!(matches!(result, Err(Error::InvalidStep { .. })));
}

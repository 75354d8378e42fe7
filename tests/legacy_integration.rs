// SPDX-License-Identifier: MPL-2.0
use midi_notifier::config::NotificationConfig;
use midi_notifier::midi::device::DEFAULT_MANUFACTURER;
use midi_notifier::midi::{
    DeviceDescriptor, DevicePayload, LegacyApi, MidiNotifier, NotificationApi, ReconnectDetail,
    ReconnectPayload,
};
use midi_notifier::ui::notifications::{NotificationId, Severity};

fn payload(json: &str) -> DevicePayload {
    serde_json::from_str(json).expect("payload parses")
}

fn body(notifier: &MidiNotifier, id: &NotificationId) -> String {
    notifier
        .manager()
        .get(id)
        .map(|n| n.body().to_string())
        .expect("notification is live")
}

#[test]
fn json_shapes_normalize_to_one_descriptor() {
    let from_string = payload(r#""Korg""#).into_descriptor();
    let from_object = payload(r#"{"name": "Korg"}"#).into_descriptor();
    assert_eq!(from_string.name, "Korg");
    assert_eq!(from_object.name, "Korg");
    assert_eq!(from_string.manufacturer, DEFAULT_MANUFACTURER);
    assert_eq!(from_object.manufacturer, DEFAULT_MANUFACTURER);

    let mixed = payload(r#"["Korg", {"name": "Roland", "id": "x"}, null, {"id": "y"}, ""]"#)
        .into_descriptor();
    assert_eq!(mixed.name, "Korg, Roland");
    assert!(mixed.id.starts_with("terra-device-"));

    let full = payload(r#"{"name": "Terra", "id": "in-7", "manufacturer": "ACME"}"#)
        .into_descriptor();
    assert_eq!(full, DeviceDescriptor::new("Terra", "in-7", "ACME"));

    assert_eq!(payload("null").into_descriptor().name, "Dispositivo Terra");
    assert_eq!(payload("[]").into_descriptor().name, "Dispositivo Terra");
}

#[test]
fn legacy_connected_matches_new_connected() {
    let mut notifier = MidiNotifier::new(&NotificationConfig::default()).expect("catalog");
    let legacy = notifier.show_device_connected(DevicePayload::from("Korg"));
    let modern = notifier.connected(&DeviceDescriptor::named("Korg"));

    assert_eq!(body(&notifier, &legacy), body(&notifier, &modern));
    let legacy = notifier.manager().get(&legacy).expect("live");
    assert_eq!(legacy.severity(), Severity::Success);
    assert_eq!(legacy.icon(), "✅");
}

#[test]
fn legacy_reconnected_matches_new_reconnected() {
    let mut notifier = MidiNotifier::new(&NotificationConfig::default()).expect("catalog");
    let from_json: ReconnectPayload =
        serde_json::from_str(r#"{"manufacturer": "Terra"}"#).expect("parses");
    let id = notifier.show_auto_reconnected(from_json);
    assert!(body(&notifier, &id).contains("<strong>Midi-Terra</strong> reconectado"));

    let legacy = notifier.show_auto_reconnected(ReconnectPayload::from("Korg"));
    let modern = notifier.auto_reconnected(&ReconnectDetail {
        name: Some("Korg".into()),
        reason: None,
    });
    assert_eq!(body(&notifier, &legacy), body(&notifier, &modern));

    let legacy = notifier.manager().get(&legacy).expect("live");
    assert_eq!(legacy.severity(), Severity::Success);
    assert_eq!(legacy.icon(), "🔄");
    assert_eq!(legacy.duration_ms(), 6000);
}

#[test]
fn legacy_reconnected_object_keeps_its_reason() {
    let mut notifier = MidiNotifier::new(&NotificationConfig::default()).expect("catalog");
    let payload: ReconnectPayload =
        serde_json::from_str(r#"{"name": "Terra", "reason": "page-reload"}"#).expect("parses");
    let id = notifier.show_auto_reconnected(payload);
    let text = body(&notifier, &id);
    assert!(text.contains("<strong>Terra</strong>"));
    assert!(text.contains("Reconexão após recarregar a página"));
}

#[test]
fn legacy_reconnect_attempt_matches_new_attempt() {
    let mut notifier = MidiNotifier::new(&NotificationConfig::default()).expect("catalog");
    let detail: ReconnectDetail =
        serde_json::from_str(r#"{"reason": "window-focus:2"}"#).expect("parses");
    let legacy = notifier.show_auto_reconnect_attempt(&detail);
    let modern = notifier.auto_reconnect_attempt(&detail);
    assert_eq!(body(&notifier, &legacy), body(&notifier, &modern));

    let notification = notifier.manager().get(&legacy).expect("live");
    assert_eq!(notification.severity(), Severity::Info);
    assert_eq!(notification.icon(), "🔄");
    assert_eq!(notification.duration_ms(), 5000);
    assert!(notification.body().contains("Reconexão ao voltar para a aba ativa"));
}

#[test]
fn scalar_payloads_follow_the_legacy_rules() {
    assert_eq!(payload("5").into_descriptor().name, "5");
    assert_eq!(payload("true").into_descriptor().name, "true");
    assert_eq!(payload("0").into_descriptor().name, "Dispositivo Terra");
    assert_eq!(payload("false").into_descriptor().name, "Dispositivo Terra");

    let reconnect: ReconnectPayload = serde_json::from_str("7").expect("numbers are accepted");
    assert_eq!(reconnect.into_detail(), ReconnectDetail::default());
}

#[test]
fn legacy_defaults_fill_missing_arguments() {
    let mut notifier = MidiNotifier::new(&NotificationConfig::default()).expect("catalog");
    let disconnected = notifier.show_device_disconnected(None, None);
    let rejected = notifier.show_device_rejected(Some(""));
    let error = notifier.show_device_error(None);

    assert!(body(&notifier, &disconnected).contains("<strong>Dispositivo Terra</strong>"));
    assert!(body(&notifier, &rejected).contains("Dispositivo não identificado"));
    assert!(body(&notifier, &error).contains("Erro desconhecido no dispositivo MIDI"));
}

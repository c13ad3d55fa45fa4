// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use pipenet_app_core::ToastKind;
use pipenet_core::{NetworkModel, NodeKey, NodeKind};
use pipenet_dry_tests::{RecordingTransport, SchemeBuilder};
use pipenet_geom::{Point, Tolerance};
use pipenet_proto::{Geometry, ObjectType};
use pipenet_sync::{RequestKind, RequestOutcome, SyncClient, TransportError};

const SCHEME: u64 = 12;

fn served() -> RecordingTransport {
    RecordingTransport::serving(
        SchemeBuilder::new(SCHEME)
            .node(NodeKind::Well, 1, [0.0, 0.0])
            .node(NodeKind::Consumer, 2, [5.0, 5.0])
            .pipe(10, "Магистраль", &[[0.0, 0.0], [1.0, 1.0]], 110.0)
            .build(),
    )
}

async fn loaded(transport: &RecordingTransport) -> (SyncClient<RecordingTransport>, NetworkModel) {
    let mut client = SyncClient::new(transport.clone(), 0);
    let (model, report) = client.load(SCHEME, Tolerance::default()).await.unwrap();
    assert_eq!((report.nodes, report.segments, report.skipped), (2, 1, 0));
    assert_eq!(client.scheme_id(), SCHEME);
    (client, model)
}

fn toast_kinds(client: &SyncClient<RecordingTransport>) -> Vec<ToastKind> {
    client.toasts().iter().map(|t| t.kind).collect()
}

#[tokio::test]
async fn freshly_loaded_scheme_saves_nothing() {
    let transport = served();
    let (mut client, mut model) = loaded(&transport).await;
    assert!(!model.has_changes());

    let report = client.save(&mut model).await;
    assert!(report.is_noop());
    assert_eq!(transport.total_calls(), 0);
    assert!(client.toasts().is_empty());
}

#[tokio::test]
async fn save_sends_three_bodies_then_goes_quiet() {
    let transport = served();
    let (mut client, mut model) = loaded(&transport).await;

    model.move_node(NodeKey::new(NodeKind::Well, 1), Point::new(0.5, 0.5));
    model.add_node(NodeKind::Pump, Point::new(3.0, 3.0));
    model.delete_node(NodeKey::new(NodeKind::Consumer, 2));

    let report = client.save(&mut model).await;
    assert!(report.is_ok());
    assert_eq!(report.update, RequestOutcome::Sent { features: 2 });
    assert!(!model.has_changes());
    assert_eq!(toast_kinds(&client), [ToastKind::Info]);

    let deletes = transport.sent_to(RequestKind::Delete);
    assert_eq!(deletes.len(), 1);
    let tomb = &deletes[0].data;
    assert_eq!(tomb.id_scheme, Some(SCHEME));
    assert_eq!(tomb.features[0].id, Some(2));
    assert_eq!(tomb.features[0].name_object_type, ObjectType::Consumer);
    assert!(tomb.features[0].geometry.is_none());
    assert!(tomb.features[0].properties.is_empty());

    let updates = transport.sent_to(RequestKind::Update);
    assert_eq!(updates[0].data.id_scheme, None);
    let pipe = updates[0]
        .data
        .features
        .iter()
        .find(|f| f.name_object_type == ObjectType::Pipe)
        .unwrap();
    assert_eq!(
        pipe.geometry,
        Some(Geometry::LineString {
            coordinates: vec![[0.5, 0.5], [1.0, 1.0]]
        })
    );

    let creates = transport.sent_to(RequestKind::Create);
    assert_eq!(creates[0].data.id_scheme, Some(SCHEME));
    assert_eq!(creates[0].data.features[0].name_object_type, ObjectType::Pump);

    let again = client.save(&mut model).await;
    assert!(again.is_noop());
    assert_eq!(transport.total_calls(), 3);
}

#[tokio::test]
async fn overlapping_pipes_are_all_sent_before_clearing() {
    let transport = served();
    let (mut client, mut model) = loaded(&transport).await;
    let a = Point::new(2.0, 0.0);
    let b = Point::new(3.0, 0.0);
    let first = model.add_pipe(&[a, b], 50.0, "a").unwrap();
    let second = model.add_pipe(&[a, b], 90.0, "b").unwrap();
    assert_eq!((first, second), (vec![11], vec![12]));

    let report = client.save(&mut model).await;
    assert_eq!(report.create, RequestOutcome::Sent { features: 2 });
    assert!(!model.has_changes());

    let creates = transport.sent_to(RequestKind::Create);
    let ids: Vec<_> = creates[0].data.features.iter().map(|f| f.id).collect();
    assert_eq!(ids, [Some(11), Some(12)]);
}

#[tokio::test]
async fn failed_request_keeps_only_its_own_set() {
    let transport = served();
    let (mut client, mut model) = loaded(&transport).await;
    transport.fail(RequestKind::Update, true);

    model.move_node(NodeKey::new(NodeKind::Well, 1), Point::new(0.5, 0.5));
    model.add_node(NodeKind::Tower, Point::new(4.0, 4.0));

    let report = client.save(&mut model).await;
    assert_eq!(report.delete, RequestOutcome::Skipped);
    assert!(matches!(
        report.update,
        RequestOutcome::Failed(TransportError::Status { status: 500, .. })
    ));
    assert!(matches!(report.create, RequestOutcome::Sent { .. }));
    assert!(model.created().is_empty());
    assert_eq!(model.updated().len(), 2);
    assert_eq!(toast_kinds(&client), [ToastKind::Error]);

    transport.fail(RequestKind::Update, false);
    let retry = client.save(&mut model).await;
    assert!(retry.is_ok());
    assert_eq!(retry.create, RequestOutcome::Skipped);
    assert_eq!(transport.calls(RequestKind::Update), 2);
    assert_eq!(transport.calls(RequestKind::Create), 1);
    assert!(!model.has_changes());
}

#[tokio::test]
async fn created_then_deleted_never_reaches_the_backend() {
    let transport = served();
    let (mut client, mut model) = loaded(&transport).await;
    let key = model.add_node(NodeKind::Capture, Point::new(9.0, 9.0)).key;
    model.delete_node(key);

    let report = client.save(&mut model).await;
    assert!(report.is_noop());
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn load_failure_is_reported_and_toasted() {
    let transport = served();
    transport.fail_load(true);
    let mut client = SyncClient::new(transport.clone(), 3);

    let err = client.load(SCHEME, Tolerance::default()).await.unwrap_err();
    assert!(matches!(err, TransportError::Unreachable(_)));
    assert_eq!(client.scheme_id(), 3);
    assert_eq!(toast_kinds(&client), [ToastKind::Error]);

    transport.fail_load(false);
    let missing = client.load(SCHEME + 1, Tolerance::default()).await;
    assert!(matches!(missing, Err(TransportError::Status { status: 404, .. })));
    assert_eq!(transport.load_count(), 2);
}

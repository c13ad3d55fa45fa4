// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use pipenet_core::{hydrate, hydrate_json, NodeKind};
use pipenet_dry_tests::{read_scheme, RecordingTransport, SchemeBuilder};
use pipenet_geom::Tolerance;
use pipenet_proto::{Envelope, FeatureCollection};
use pipenet_sync::{RequestKind, SchemeTransport};

fn scheme() -> SchemeBuilder {
    SchemeBuilder::new(4)
        .node(NodeKind::Well, 2, [0.0, 0.0])
        .bare_pipe(5, &[[0.0, 0.0], [0.001, 0.0], [0.002, 0.0]], 63.0)
}

#[test]
fn built_scheme_hydrates() {
    let fc = scheme().build();
    let (model, report) = hydrate(&fc.features, Tolerance::default());
    assert_eq!((report.nodes, report.segments), (1, 1));
    let seg = model.segment(5).unwrap();
    assert_eq!(seg.name(), "Труба #5");
    assert_eq!(seg.diameter, 63.0);
}

#[test]
fn json_fixture_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scheme.json");
    let builder = scheme();
    std::fs::write(&path, builder.to_json().unwrap()).unwrap();

    let fc = read_scheme(&path).unwrap();
    assert_eq!(fc, builder.build());
    let text = std::fs::read_to_string(&path).unwrap();
    let (model, _) = hydrate_json(&text, Tolerance::default()).unwrap();
    assert_eq!(model.node_count(), 1);

    let err = read_scheme(dir.path().join("missing.json")).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[tokio::test]
async fn recording_transport_counts_and_fails_per_endpoint() {
    let t = RecordingTransport::serving(scheme().build());
    t.fail(RequestKind::Delete, true);
    let body = Envelope::new(FeatureCollection::new(Some(4)));

    assert!(t.delete_objects(&body).await.is_err());
    assert!(t.create_objects(&body).await.is_ok());
    assert_eq!(t.calls(RequestKind::Delete), 1);
    assert_eq!(t.calls(RequestKind::Create), 1);
    assert_eq!(t.calls(RequestKind::Update), 0);
    assert_eq!(t.sent_to(RequestKind::Create), vec![body]);

    assert_eq!(t.load_scheme(4).await.unwrap().len(), 2);
    assert!(t.load_scheme(5).await.is_err());
}

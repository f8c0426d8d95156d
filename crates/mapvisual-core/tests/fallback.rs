mod common;

use common::{assembler, collection, feature, write, MockHttpClient};
use mapvisual_core::catalog::{Output, US_STATES_TOPO_URL};
use mapvisual_core::loader::{SourceChain, SourceDescriptor, SourceSchema};
use mapvisual_core::{BoundaryDocument, BoundaryError, BoundaryKind, BoundarySpec};
use serde_json::json;

fn india_spec(sources: SourceChain) -> BoundarySpec {
    BoundarySpec {
        kind: BoundaryKind::IndiaStates,
        sources,
        overlays: Vec::new(),
        output: Output::Features,
        remediation: "Run: mapvisual fetch in states".into(),
    }
}

#[test]
fn first_working_source_wins_and_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new().route(
        "https://working.example/states.json",
        &collection(vec![
            feature(json!({ "st_nm": "Orissa" }), 85.0, 20.0),
            feature(json!({ "hc-key": "tamil-nadu" }), 78.0, 11.0),
        ]),
    );
    let spec = india_spec(SourceChain::offline_first(vec![
        SourceDescriptor::local("missing", dir.path().join("nope.geojson"), SourceSchema::StateLevel),
        SourceDescriptor::remote("broken", "https://broken.example/states.json", SourceSchema::StateLevel)
            .with_priority(1),
        SourceDescriptor::remote("working", "https://working.example/states.json", SourceSchema::StateLevel)
            .with_priority(2),
    ]));

    let doc = assembler(dir.path(), http).assemble_spec(&spec).unwrap();
    let fc = doc.into_features().unwrap();

    assert_eq!(fc.names(), ["Odisha", "Tamil Nadu"]);
    assert_eq!(fc.features[0].properties["name"], "Odisha");
    assert_eq!(fc.features[1].properties["NAME_1"], "Tamil Nadu");
}

#[test]
fn all_failing_sources_report_the_last_error() {
    let dir = tempfile::tempdir().unwrap();
    let spec = india_spec(SourceChain::offline_first(vec![
        SourceDescriptor::local("missing", dir.path().join("nope.geojson"), SourceSchema::StateLevel),
        SourceDescriptor::remote("cdn-a", "https://a.example/x.json", SourceSchema::StateLevel),
        SourceDescriptor::remote("cdn-b", "https://b.example/x.json", SourceSchema::StateLevel)
            .with_priority(1),
    ]));

    let err = assembler(dir.path(), MockHttpClient::new())
        .assemble_spec(&spec)
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.remediation(), Some("Run: mapvisual fetch in states"));
    let BoundaryError::NoUsableSource { last_error, .. } = err else {
        panic!("expected NoUsableSource");
    };
    let last = last_error.to_string();
    assert!(last.contains("cdn-b"), "{last}");
    assert!(last.contains("404"), "{last}");
}

#[test]
fn local_file_is_used_without_touching_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("india/indian_states.geojson");
    write(&local, &collection(vec![feature(json!({ "NAME_1": "Goa" }), 74.0, 15.0)]));

    let http = MockHttpClient::new().route(
        "https://cdn.example/states.json",
        &collection(vec![feature(json!({ "NAME_1": "Remote" }), 74.0, 15.0)]),
    );
    let recorder = http.clone();
    let spec = india_spec(SourceChain::offline_first(vec![
        SourceDescriptor::remote("cdn", "https://cdn.example/states.json", SourceSchema::StateLevel),
        SourceDescriptor::local("cache", &local, SourceSchema::StateLevel).with_priority(5),
    ]));

    let fc = assembler(dir.path(), http)
        .assemble_spec(&spec)
        .unwrap()
        .into_features()
        .unwrap();

    assert_eq!(fc.names(), ["Goa"]);
    assert!(recorder.calls().is_empty());
}

#[test]
fn failed_fetch_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new().route(
        "https://second.example/x.json",
        &collection(vec![feature(json!({ "name": "Kerala" }), 76.0, 10.0)]),
    );
    let recorder = http.clone();
    let spec = india_spec(SourceChain::offline_first(vec![
        SourceDescriptor::remote("first", "https://first.example/x.json", SourceSchema::StateLevel),
        SourceDescriptor::remote("second", "https://second.example/x.json", SourceSchema::StateLevel)
            .with_priority(1),
    ]));

    assembler(dir.path(), http).assemble_spec(&spec).unwrap();

    assert_eq!(
        recorder.calls(),
        ["https://first.example/x.json", "https://second.example/x.json"]
    );
}

#[test]
fn invalid_and_empty_documents_fall_through() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new()
        .route_raw("https://garbage.example/x.json", "<html>rate limited</html>")
        .route("https://empty.example/x.json", &collection(Vec::new()))
        .route(
            "https://good.example/x.json",
            &collection(vec![feature(json!({ "name": "Assam" }), 92.0, 26.0)]),
        );
    let spec = india_spec(SourceChain::as_listed(vec![
        SourceDescriptor::remote("garbage", "https://garbage.example/x.json", SourceSchema::StateLevel),
        SourceDescriptor::remote("empty", "https://empty.example/x.json", SourceSchema::StateLevel),
        SourceDescriptor::remote("good", "https://good.example/x.json", SourceSchema::StateLevel),
    ]));

    let fc = assembler(dir.path(), http)
        .assemble_spec(&spec)
        .unwrap()
        .into_features()
        .unwrap();
    assert_eq!(fc.names(), ["Assam"]);
}

#[test]
fn district_level_source_is_aggregated() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new().route(
        "https://districts.example/x.json",
        &collection(vec![
            feature(json!({ "NAME_1": "Orissa", "NAME_2": "Puri" }), 85.0, 19.0),
            feature(json!({ "NAME_1": "Goa", "NAME_2": "North Goa" }), 73.0, 15.0),
            feature(json!({ "NAME_1": "Odisha", "NAME_2": "Cuttack" }), 85.0, 20.0),
            json!({ "type": "Feature", "properties": { "NAME_1": "Goa" }, "geometry": null }),
        ]),
    );
    let spec = india_spec(SourceChain::offline_first(vec![SourceDescriptor::remote(
        "districts",
        "https://districts.example/x.json",
        SourceSchema::DistrictLevel {
            state_key: "NAME_1".into(),
        },
    )]));

    let fc = assembler(dir.path(), http)
        .assemble_spec(&spec)
        .unwrap()
        .into_features()
        .unwrap();

    assert_eq!(fc.names(), ["Odisha", "Goa"]);
    assert_eq!(fc.features[0].area().unwrap().polygons().count(), 2);
    assert_eq!(fc.features[0].properties["st_nm"], "Odisha");
}

#[test]
fn aliases_resolving_to_one_name_become_one_feature() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("india/indian_states.geojson");
    write(
        &local,
        &collection(vec![
            feature(json!({ "NAME_1": "Orissa" }), 85.0, 20.0),
            feature(json!({ "NAME_1": "Goa" }), 74.0, 15.0),
            feature(json!({ "NAME_1": "Odisha" }), 86.0, 21.0),
        ]),
    );

    let fc = assembler(dir.path(), MockHttpClient::new())
        .assemble(BoundaryKind::IndiaStates)
        .unwrap()
        .into_features()
        .unwrap();

    assert_eq!(fc.names(), ["Odisha", "Goa"]);
    let odisha = fc.features[0].area().unwrap();
    assert_eq!(odisha.polygons().count(), 2);
    assert!(odisha.contains_polygon(&common::square(86.0, 21.0)));
}

#[test]
fn placeholder_cache_falls_back_to_remote_topology() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("topojson/us_states.topo.json"),
        &json!({ "type": "Topology", "arcs": [], "objects": {} }),
    );
    let http = MockHttpClient::new().route(
        US_STATES_TOPO_URL,
        &json!({
            "type": "Topology",
            "bbox": [-179.1, 18.9, 179.7, 71.4],
            "transform": { "scale": [0.001, 0.001], "translate": [-179.1, 18.9] },
            "arcs": [[[0, 0], [10, 10]]],
            "objects": { "states": { "type": "GeometryCollection", "geometries": [] } }
        }),
    );

    let doc = assembler(dir.path(), http)
        .assemble(BoundaryKind::UsStatesTopo)
        .unwrap();

    let BoundaryDocument::Topology(topology) = &doc else {
        panic!("expected a topology");
    };
    assert_eq!(topology.arcs.len(), 1);
    let out = serde_json::to_value(&doc).unwrap();
    assert_eq!(out["type"], "Topology");
    assert_eq!(out["transform"]["scale"][0], 0.001);
}

#[test]
fn offline_mode_never_calls_remotes() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new();
    let recorder = http.clone();
    let assembler = mapvisual_core::BoundaryAssembler::new(
        mapvisual_core::AssemblerConfig::default()
            .with_data_dir(dir.path())
            .offline(true),
        mapvisual_core::AliasTable::with_defaults(),
        Box::new(http),
    );

    let err = assembler.assemble(BoundaryKind::IndiaOptionB).unwrap_err();

    assert!(err.is_not_found());
    assert!(recorder.calls().is_empty());
}

#[cfg(all(feature = "json", feature = "compact"))]
#[test]
fn gzip_cache_is_read_transparently() {
    use mapvisual_core::loader::common_io::write_json;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("states.geojson.gz");
    write_json(
        &path,
        &collection(vec![feature(json!({ "NAME_1": "Pondicherry" }), 79.0, 11.0)]),
    )
    .unwrap();
    let spec = india_spec(SourceChain::offline_first(vec![SourceDescriptor::local(
        "gz-cache",
        &path,
        SourceSchema::StateLevel,
    )]));

    let fc = assembler(dir.path(), MockHttpClient::new())
        .assemble_spec(&spec)
        .unwrap()
        .into_features()
        .unwrap();
    assert_eq!(fc.names(), ["Puducherry"]);
}

#[cfg(feature = "json")]
#[test]
fn refreshing_us_states_keeps_the_shared_topology_cache() {
    let dir = tempfile::tempdir().unwrap();
    let http = MockHttpClient::new().route(
        US_STATES_TOPO_URL,
        &json!({
            "type": "Topology",
            "arcs": [[[0, 0], [10, 10]]],
            "objects": { "states": { "type": "GeometryCollection", "geometries": [
                { "type": "MultiPolygon", "id": "06", "properties": { "name": "California" }, "arcs": [[[0]]] }
            ] } }
        }),
    );
    let online = assembler(dir.path(), http);

    let topo_path = online.refresh(BoundaryKind::UsStatesTopo).unwrap();
    let stub_path = online.refresh(BoundaryKind::UsStates).unwrap();
    assert_eq!(topo_path, stub_path);

    let cached: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&topo_path).unwrap()).unwrap();
    assert_eq!(cached["type"], "Topology");
    assert_eq!(cached["arcs"].as_array().unwrap().len(), 1);

    let offline = mapvisual_core::BoundaryAssembler::new(
        mapvisual_core::AssemblerConfig::default()
            .with_data_dir(dir.path())
            .offline(true),
        mapvisual_core::AliasTable::with_defaults(),
        Box::new(MockHttpClient::new()),
    );
    let topo = offline.assemble(BoundaryKind::UsStatesTopo).unwrap();
    assert!(matches!(topo, BoundaryDocument::Topology(_)));
    let stubs = offline
        .assemble(BoundaryKind::UsStates)
        .unwrap()
        .into_features()
        .unwrap();
    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs.features[0].properties["name"], "California");
}

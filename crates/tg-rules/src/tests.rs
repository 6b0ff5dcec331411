#[cfg(test)]
mod helpers {
    use chrono::{Duration, TimeZone, Utc};
    use tg_core::{EntityId, GeoPoint, Timestamp, format_timestamp};
    use tg_zones::{RoutePolyline, Zone, ZoneKind, ZoneSet};

    use crate::{GpsFix, RawFix, RuleSet, Thresholds};

    pub fn id(s: &str) -> EntityId {
        EntityId::new(s).unwrap()
    }

    pub fn t(secs: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
    }

    pub fn fix(entity: &str, at: Option<(f64, f64)>, secs: i64) -> GpsFix {
        GpsFix::new(id(entity), at.map(GeoPoint::from), t(secs))
    }

    pub fn raw(entity: &str, at: Option<(f64, f64)>, secs: i64) -> RawFix {
        RawFix::new(entity, at.map(|p| p.0), at.map(|p| p.1), format_timestamp(t(secs)))
    }

    pub fn rect(name: &str, kind: ZoneKind, lat: (f64, f64), lon: (f64, f64)) -> Zone {
        Zone::new(name, kind, vec![
            GeoPoint::new(lat.0, lon.0),
            GeoPoint::new(lat.0, lon.1),
            GeoPoint::new(lat.1, lon.1),
            GeoPoint::new(lat.1, lon.0),
        ])
    }

    /// Allowed zone spanning ±1° around the origin, restricted zone at
    /// lat 0.01..0.02, lon 0..0.01 inside it.
    pub fn zones() -> ZoneSet {
        ZoneSet::new([
            rect("park", ZoneKind::Allowed, (-1.0, 1.0), (-1.0, 1.0)),
            rect("quarry", ZoneKind::Restricted, (0.01, 0.02), (0.0, 0.01)),
        ])
    }

    pub fn rules() -> RuleSet {
        RuleSet::new(Thresholds::default(), zones(), RoutePolyline::empty())
    }

    /// Same zones plus a route along the equator from lon 0 to lon 1.
    pub fn rules_with_route() -> RuleSet {
        let route = RoutePolyline::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        RuleSet::new(Thresholds::default(), zones(), route)
    }
}

// ── Thresholds ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod thresholds {
    use std::io::{Cursor, Write};

    use crate::{RulesError, Thresholds};

    #[test]
    fn defaults() {
        let th = Thresholds::default();
        assert_eq!(th.stationary_too_long_seconds, 300.0);
        assert_eq!(th.max_speed_mps, 15.0);
        assert_eq!(th.signal_drop_seconds, 900.0);
        assert_eq!(th.max_route_deviation_meters, 200.0);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"stationary_too_long_seconds": 60, "max_speed_mps": 3.5,
                "signal_drop_seconds": 120, "max_route_deviation_meters": 50}}"#
        )
        .unwrap();

        let th = Thresholds::load(file.path()).unwrap();
        assert_eq!(th.stationary_too_long_seconds, 60.0);
        assert_eq!(th.max_speed_mps, 3.5);
        assert_eq!(th.signal_drop_seconds, 120.0);
        assert_eq!(th.max_route_deviation_meters, 50.0);
    }

    #[test]
    fn partial_file_is_rejected() {
        let json = r#"{"max_speed_mps": 3.5}"#;
        let err = Thresholds::from_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, RulesError::Json(_)));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let json = r#"{"stationary_too_long_seconds": 60, "max_speed_mps": 3.5,
                       "signal_drop_seconds": 120, "max_route_deviation_meters": 50,
                       "max_altitude_m": 9000}"#;
        assert!(Thresholds::from_reader(Cursor::new(json)).is_err());
    }

    #[test]
    fn negative_value_is_rejected() {
        let json = r#"{"stationary_too_long_seconds": 60, "max_speed_mps": -1,
                       "signal_drop_seconds": 120, "max_route_deviation_meters": 50}"#;
        let err = Thresholds::from_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, RulesError::InvalidThreshold { name: "max_speed_mps", .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Thresholds::load(std::path::Path::new("/nonexistent/thresholds.json")).unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }
}

// ── Fix validation ────────────────────────────────────────────────────────────

#[cfg(test)]
mod fix {
    use tg_core::GeoPoint;

    use super::helpers::{raw, t};
    use crate::{FixError, GpsFix, RawFix};

    #[test]
    fn valid_fix() {
        let fix = GpsFix::try_from(raw("T1", Some((12.5, 77.25)), 30)).unwrap();
        assert_eq!(fix.entity.as_str(), "T1");
        assert_eq!(fix.position, Some(GeoPoint::new(12.5, 77.25)));
        assert_eq!(fix.timestamp, t(30));
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let raw = RawFix::new("T1", None, None, "2024-01-01 00:00:30");
        assert_eq!(GpsFix::try_from(raw).unwrap().timestamp, t(30));
    }

    #[test]
    fn half_a_position_is_no_position() {
        let raw = RawFix::new("T1", Some(1.0), None, "2024-01-01T00:00:00Z");
        assert_eq!(GpsFix::try_from(raw).unwrap().position, None);
    }

    #[test]
    fn blank_entity_is_rejected() {
        let raw = RawFix::new("   ", Some(1.0), Some(1.0), "2024-01-01T00:00:00Z");
        assert_eq!(GpsFix::try_from(raw), Err(FixError::MissingEntity));
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let raw = RawFix::new("T1", Some(1.0), Some(1.0), "noon-ish");
        assert!(matches!(GpsFix::try_from(raw), Err(FixError::BadTimestamp { .. })));
    }

    #[test]
    fn out_of_range_is_no_position() {
        let raw = RawFix::new("T1", Some(91.0), Some(0.0), "2024-01-01T00:00:30Z");
        let fix = GpsFix::try_from(raw).unwrap();
        assert_eq!(fix.position, None);
        assert_eq!(fix.timestamp, t(30));

        let raw = RawFix::new("T1", Some(0.0), Some(f64::NAN), "2024-01-01T00:00:00Z");
        assert_eq!(GpsFix::try_from(raw).unwrap().position, None);

        let raw = RawFix::new("T1", Some(0.0), Some(180.5), "2024-01-01T00:00:00Z");
        assert_eq!(GpsFix::try_from(raw).unwrap().position, None);
    }

    #[test]
    fn json_with_missing_fields_deserializes() {
        let raw: RawFix = serde_json::from_str(r#"{"timestamp": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(GpsFix::try_from(raw), Err(FixError::MissingEntity));
    }
}

// ── Rule pass ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rules {
    use tg_core::{Anomaly, GeoPoint};
    use tg_track::TrackState;

    use super::helpers::{fix, rules, rules_with_route, t};
    use crate::{RuleEngine, RuleSet, evaluate_with};

    #[test]
    fn first_fix_inside_allowed_zone_is_clean() {
        let mut state = TrackState::default();
        assert!(evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules(), &mut state).is_empty());
        assert_eq!(state.last_update, Some(t(0)));
        assert_eq!(state.last_position.unwrap().point, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn stationary_scenario() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);
        let out = evaluate_with(&fix("T1", Some((0.0, 0.0)), 800), &rules, &mut state);
        assert_eq!(out, vec![Anomaly::StationaryTooLong]);
    }

    #[test]
    fn stationary_needs_long_enough_gap() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);
        let out = evaluate_with(&fix("T1", Some((0.0, 0.0)), 300), &rules, &mut state);
        assert!(out.is_empty());
    }

    #[test]
    fn stationary_needs_small_displacement() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);
        // ~11 m north after 10 minutes.
        let out = evaluate_with(&fix("T1", Some((0.0001, 0.0)), 600), &rules, &mut state);
        assert!(out.is_empty());
    }

    #[test]
    fn excessive_speed_scenario() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);
        // ~20 km in 60 s.
        let out = evaluate_with(&fix("T1", Some((0.18, 0.0)), 60), &rules, &mut state);
        assert_eq!(out, vec![Anomaly::ExcessiveSpeed]);
    }

    #[test]
    fn same_timestamp_is_zero_speed() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);
        let out = evaluate_with(&fix("T1", Some((0.5, 0.5)), 0), &rules, &mut state);
        assert!(!out.contains(&Anomaly::ExcessiveSpeed));
    }

    #[test]
    fn out_of_order_fix_does_not_panic() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 1000), &rules, &mut state);
        let out = evaluate_with(&fix("T1", Some((0.5, 0.5)), 0), &rules, &mut state);
        assert!(out.is_empty());
        assert_eq!(state.last_update, Some(t(0)));
    }

    #[test]
    fn signal_drop_fires_only_past_threshold() {
        let rules = rules();

        let mut state = TrackState::default();
        evaluate_with(&fix("T1", None, 0), &rules, &mut state);
        assert!(evaluate_with(&fix("T1", None, 900), &rules, &mut state).is_empty());

        let mut state = TrackState::default();
        evaluate_with(&fix("T1", None, 0), &rules, &mut state);
        assert_eq!(
            evaluate_with(&fix("T1", None, 901), &rules, &mut state),
            vec![Anomaly::SignalDrop]
        );
    }

    #[test]
    fn missing_position_runs_only_signal_drop() {
        let rules = rules();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.0, 0.0)), 0), &rules, &mut state);

        let out = evaluate_with(&fix("T1", None, 1000), &rules, &mut state);
        assert_eq!(out, vec![Anomaly::SignalDrop]);

        let pos = state.last_position.unwrap();
        assert_eq!(pos.point, GeoPoint::new(0.0, 0.0));
        assert_eq!(pos.at, t(0));
        assert_eq!(state.last_update, Some(t(1000)));
    }

    #[test]
    fn restricted_zone_entry() {
        let mut state = TrackState::default();
        let out = evaluate_with(&fix("T1", Some((0.015, 0.005)), 0), &rules(), &mut state);
        assert_eq!(out, vec![Anomaly::RestrictedZoneEntry]);
    }

    #[test]
    fn geofence_exit() {
        let mut state = TrackState::default();
        let out = evaluate_with(&fix("T1", Some((5.0, 5.0)), 0), &rules(), &mut state);
        assert_eq!(out, vec![Anomaly::GeofenceExit]);
    }

    #[test]
    fn no_allowed_zones_means_no_geofence_exit() {
        let mut state = TrackState::default();
        let out = evaluate_with(&fix("T1", Some((5.0, 5.0)), 0), &RuleSet::default(), &mut state);
        assert!(out.is_empty());
    }

    #[test]
    fn zone_boundary_is_outside() {
        // Exactly on the allowed zone's edge.
        let mut state = TrackState::default();
        let out = evaluate_with(&fix("T1", Some((1.0, 0.0)), 0), &rules(), &mut state);
        assert_eq!(out, vec![Anomaly::GeofenceExit]);
    }

    #[test]
    fn route_deviation_on_and_off_route() {
        let rules = rules_with_route();

        let mut state = TrackState::default();
        // ~111 m from the route.
        assert!(evaluate_with(&fix("T1", Some((0.001, 0.5)), 0), &rules, &mut state).is_empty());

        let mut state = TrackState::default();
        // ~1.1 km from the route.
        assert_eq!(
            evaluate_with(&fix("T1", Some((0.01, 0.5)), 0), &rules, &mut state),
            vec![Anomaly::RouteDeviation]
        );
    }

    #[test]
    fn labels_come_in_rule_order() {
        let rules = rules_with_route();
        let mut state = TrackState::default();
        evaluate_with(&fix("T1", Some((0.015, 0.005)), 0), &rules, &mut state);
        // Same place after a long silence, still in the quarry and off-route.
        let out = evaluate_with(&fix("T1", Some((0.015, 0.005)), 1000), &rules, &mut state);
        assert_eq!(out, vec![
            Anomaly::SignalDrop,
            Anomaly::StationaryTooLong,
            Anomaly::RestrictedZoneEntry,
            Anomaly::RouteDeviation,
        ]);
    }

    #[test]
    fn engine_keeps_entities_apart() {
        let engine = RuleEngine::new(rules());
        engine.evaluate(&fix("A", Some((0.0, 0.0)), 0));
        engine.evaluate(&fix("B", Some((0.3, 0.3)), 0));

        let out = engine.evaluate(&fix("A", Some((0.0, 0.0)), 800));
        assert_eq!(out, vec![Anomaly::StationaryTooLong]);
        assert_eq!(engine.store().len(), 2);
    }

    #[test]
    fn batch_matches_sequential() {
        let fixes = vec![
            fix("A", Some((0.0, 0.0)), 0),
            fix("B", Some((0.5, 0.5)), 0),
            fix("A", Some((0.0, 0.0)), 800),
            fix("C", None, 0),
            fix("B", Some((0.68, 0.5)), 60),
            fix("A", Some((0.015, 0.005)), 1000),
            fix("C", None, 2000),
            fix("B", Some((5.0, 5.0)), 4000),
        ];

        let sequential_engine = RuleEngine::new(rules_with_route());
        let sequential: Vec<_> = fixes.iter().map(|f| sequential_engine.evaluate(f)).collect();

        let batch_engine = RuleEngine::new(rules_with_route());
        let batch = batch_engine.evaluate_batch(&fixes);

        assert_eq!(batch, sequential);
        assert_eq!(batch[2], vec![Anomaly::StationaryTooLong]);
        assert_eq!(batch[6], vec![Anomaly::SignalDrop]);
    }

    #[test]
    fn empty_batch() {
        let engine = RuleEngine::new(rules());
        assert!(engine.evaluate_batch(&[]).is_empty());
        assert!(engine.store().is_empty());
    }
}

// ── Monitor ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod monitor {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tg_core::{Anomaly, GeoPoint};
    use tg_score::{AnomalyEvent, EventSink, RecordPolicy};
    use tg_zones::{
        ProviderError, RoadSnapProvider, RouteEndpoints, RouteProvider, StaticRoute, ZoneConfig,
    };

    use super::helpers::{id, raw, rules, t, zones};
    use crate::{FixError, Monitor, MonitorConfig, RawFix, RuleSet, Thresholds};

    fn config() -> MonitorConfig {
        MonitorConfig { provider_timeout: Duration::from_millis(20), ..MonitorConfig::default() }
    }

    struct SlowSnap;

    impl RoadSnapProvider for SlowSnap {
        async fn snap(&self, point: GeoPoint) -> Result<GeoPoint, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(GeoPoint::new(point.lat + 0.015, point.lon + 0.005))
        }
    }

    /// Snaps every point into the quarry.
    struct QuarrySnap;

    impl RoadSnapProvider for QuarrySnap {
        async fn snap(&self, _point: GeoPoint) -> Result<GeoPoint, ProviderError> {
            Ok(GeoPoint::new(0.015, 0.005))
        }
    }

    struct FailingRoute;

    impl RouteProvider for FailingRoute {
        async fn resolve(&self, _o: GeoPoint, _d: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
            Err(ProviderError::Unavailable("directions service down".into()))
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<AnomalyEvent>>);

    impl EventSink for Collect {
        fn publish(&self, event: &AnomalyEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[tokio::test]
    async fn t1_history_scores_40() {
        let monitor = Monitor::without_snapping(rules(), config());

        assert!(monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap().is_empty());
        assert_eq!(
            monitor.ingest(raw("T1", Some((0.0, 0.0)), 800)).await.unwrap(),
            vec![Anomaly::StationaryTooLong]
        );
        assert_eq!(
            monitor.ingest(raw("T1", Some((0.015, 0.005)), 1400)).await.unwrap(),
            vec![Anomaly::RestrictedZoneEntry]
        );

        assert_eq!(monitor.events(&id("T1")).len(), 2);
        assert!((monitor.safety_score(&id("T1")) - 40.0).abs() < 1e-9);
        assert_eq!(monitor.safety_score(&id("nobody")), 100.0);
    }

    #[tokio::test]
    async fn malformed_fix_leaves_state_untouched() {
        let monitor = Monitor::without_snapping(rules(), config());
        monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap();
        let before = monitor.engine().store().get(&id("T1"));

        let bad = RawFix::new("T1", Some(0.0), Some(0.0), "not a time");
        assert!(matches!(monitor.ingest(bad).await, Err(FixError::BadTimestamp { .. })));

        let blank = RawFix::new("", Some(0.0), Some(0.0), "2024-01-01T00:00:00Z");
        assert_eq!(monitor.ingest(blank).await, Err(FixError::MissingEntity));

        assert_eq!(monitor.engine().store().get(&id("T1")), before);
        assert_eq!(monitor.engine().store().len(), 1);
        assert!(monitor.log().entities().is_empty());
    }

    #[tokio::test]
    async fn snapped_position_is_evaluated() {
        let monitor = Monitor::new(rules(), QuarrySnap, config());
        let out = monitor.ingest(raw("T1", Some((0.5, 0.5)), 0)).await.unwrap();
        assert_eq!(out, vec![Anomaly::RestrictedZoneEntry]);
    }

    #[tokio::test]
    async fn snap_timeout_uses_raw_position() {
        let monitor = Monitor::new(rules(), SlowSnap, config());
        let out = monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap();
        assert!(out.is_empty());

        let state = monitor.engine().store().get(&id("T1")).unwrap();
        assert_eq!(state.last_position.unwrap().point, GeoPoint::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn positionless_fix_skips_snapping() {
        let monitor = Monitor::new(rules(), QuarrySnap, config());
        let out = monitor.ingest(raw("T1", None, 0)).await.unwrap();
        assert!(out.is_empty());
        assert!(monitor.engine().store().get(&id("T1")).unwrap().last_position.is_none());
    }

    #[tokio::test]
    async fn sinks_receive_recorded_events() {
        let sink = Arc::new(Collect::default());
        let monitor =
            Monitor::without_snapping(rules(), config()).with_sink(sink.clone());

        monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap();
        monitor.ingest(raw("T1", Some((5.0, 5.0)), 100_000)).await.unwrap();

        let events = sink.0.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, t(100_000));
        assert_eq!(events[0].anomalies, vec![Anomaly::SignalDrop, Anomaly::GeofenceExit]);
    }

    #[tokio::test]
    async fn every_fix_policy_records_clean_fixes() {
        let config = MonitorConfig { record_policy: RecordPolicy::EveryFix, ..config() };
        let monitor = Monitor::without_snapping(rules(), config);

        monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap();
        monitor.ingest(raw("T1", Some((0.001, 0.0)), 60)).await.unwrap();

        assert_eq!(monitor.events(&id("T1")).len(), 2);
        assert_eq!(monitor.safety_score(&id("T1")), 100.0);
    }

    #[tokio::test]
    async fn concurrent_ingest_across_entities() {
        let monitor = Arc::new(Monitor::without_snapping(rules(), config()));

        let mut handles = Vec::new();
        for n in 0..16 {
            let monitor = Arc::clone(&monitor);
            handles.push(tokio::spawn(async move {
                let entity = format!("E{n}");
                monitor.ingest(raw(&entity, Some((0.0, 0.0)), 0)).await.unwrap();
                monitor.ingest(raw(&entity, Some((0.0, 0.0)), 800)).await.unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), vec![Anomaly::StationaryTooLong]);
        }
        assert_eq!(monitor.engine().store().len(), 16);
        assert_eq!(monitor.log().entities().len(), 16);
    }

    #[tokio::test]
    async fn rule_set_resolves_route() {
        let endpoints = RouteEndpoints {
            origin:      GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 1.0),
        };
        let config = ZoneConfig { zones: zones(), route: Some(endpoints) };
        let provider = StaticRoute(vec![endpoints.origin, endpoints.destination]);

        let rules = RuleSet::resolve(Thresholds::default(), config, &provider, Duration::from_millis(20)).await;
        assert_eq!(rules.route.len(), 2);
        assert_eq!(rules.zones.allowed.len(), 1);
    }

    #[tokio::test]
    async fn route_failure_disables_route_deviation() {
        let endpoints = RouteEndpoints {
            origin:      GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 1.0),
        };
        let config = ZoneConfig { zones: zones(), route: Some(endpoints) };
        let rules =
            RuleSet::resolve(Thresholds::default(), config, &FailingRoute, Duration::from_millis(20)).await;
        assert!(rules.route.is_empty());

        let monitor = Monitor::without_snapping(rules, MonitorConfig::default());
        let out = monitor.ingest(raw("T1", Some((0.5, 0.5)), 0)).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_fix_still_detects_signal_drop() {
        let monitor = Monitor::without_snapping(rules(), config());
        assert!(monitor.ingest(raw("T1", Some((0.0, 0.0)), 0)).await.unwrap().is_empty());

        let out = monitor.ingest(raw("T1", Some((91.0, 0.0)), 2000)).await.unwrap();
        assert_eq!(out, vec![Anomaly::SignalDrop]);

        let state = monitor.engine().store().get(&id("T1")).unwrap();
        assert_eq!(state.last_update, Some(t(2000)));
        assert_eq!(state.last_position.unwrap().point, GeoPoint::new(0.0, 0.0));
    }

    /// Counts resolve calls and returns a fixed two-vertex route.
    #[derive(Default)]
    struct CountingRoute(AtomicUsize);

    impl RouteProvider for CountingRoute {
        async fn resolve(&self, o: GeoPoint, d: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![o, d])
        }
    }

    #[tokio::test]
    async fn no_route_endpoints_skip_the_provider() {
        let provider = CountingRoute::default();
        let config = ZoneConfig { zones: zones(), route: None };
        let rules = RuleSet::resolve(Thresholds::default(), config, &provider, Duration::from_millis(20)).await;
        assert!(rules.route.is_empty());
        assert_eq!(provider.0.load(Ordering::SeqCst), 0);

        let endpoints = RouteEndpoints {
            origin:      GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 1.0),
        };
        let config = ZoneConfig { zones: zones(), route: Some(endpoints) };
        let rules = RuleSet::resolve(Thresholds::default(), config, &provider, Duration::from_millis(20)).await;
        assert_eq!(rules.route.len(), 2);
        assert_eq!(provider.0.load(Ordering::SeqCst), 1);
    }
}

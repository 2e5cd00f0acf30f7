//! Integration tests for the display decoder
//!
//! Drives the complete path from segment snapshots through the refresh
//! gate, interrogation pass and layout selection to the shared reading.

#![cfg(test)]

mod common;

use oximeter_core::{
    compose_digits,
    constants::{CANDIDATE_LAYOUTS, FALLBACK_LAYOUT, REFRESH_THRESHOLD, SAMPLES_PER_CYCLE},
    CandidateLayout, DecodedDigit, DisplayDecoder, DisplayLayout, LayoutResolver,
    PeriodicRefreshGate, Probe, Reading, ReadingSlot, SamplingCycleScanner, ScanError,
    SegmentLine, SegmentState, NoDelay,
};

use common::{
    scenarios::{self, standard_scenarios},
    DisplayFrame, EdgeTrain, ScriptedDisplay,
};

fn edges_until_pass<B, const N: usize>(decoder: &mut DisplayDecoder<'_, B, NoDelay, N>) -> Reading
where
    B: oximeter_core::SegmentBus,
{
    for _ in 0..REFRESH_THRESHOLD {
        if let Some(reading) = decoder.on_edge_event().expect("pass failed") {
            return reading;
        }
    }
    panic!("gate did not fire within {REFRESH_THRESHOLD} edges");
}

#[test]
fn test_every_layout_resolves_its_own_frame() {
    let resolver: LayoutResolver = LayoutResolver::default();

    for scenario in standard_scenarios() {
        let resolved = resolver.resolve(&scenario.frame.to_cycle());

        assert_eq!(resolved.layout_id, scenario.layout.id, "wrong layout selected");
        assert_eq!(resolved.used_fallback, scenario.used_fallback);
        assert_eq!(
            compose_digits(&resolved.heart_rate),
            Some(scenario.heart_rate),
            "heart rate for layout {}",
            scenario.layout.id
        );
        assert_eq!(
            compose_digits(&resolved.spo2),
            Some(scenario.spo2),
            "SpO2 for layout {}",
            scenario.layout.id
        );
    }
}

#[test]
fn test_end_to_end_heart_rate() {
    let slot = ReadingSlot::new();
    // 7, 2, 0 at the default heart-rate positions, everything else dark
    let frame = DisplayFrame::dark().digit(50, 7).digit(10, 2).digit(2, 0);
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::showing(frame), NoDelay, &slot);

    let reading = edges_until_pass(&mut decoder);

    assert_eq!(reading.heart_rate(), Some(720));
    assert_eq!(reading.layout_id(), Some(FALLBACK_LAYOUT.id));
    assert_eq!(slot.load(), reading);
    assert_eq!(decoder.scanner_mut().bus_mut().reads, SAMPLES_PER_CYCLE);
}

#[test]
fn test_default_layout_round_trip() {
    let slot = ReadingSlot::new();
    let scenario = scenarios::fallback(123, 97);
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::showing(scenario.frame), NoDelay, &slot);

    let reading = decoder.refresh().unwrap();

    assert_eq!(reading.heart_rate(), Some(123));
    assert_eq!(reading.spo2_digits().map(DecodedDigit::value), [Some(9), Some(7)]);
    assert_eq!(reading.layout_id(), Some(5));
}

#[test]
fn test_unreadable_digit_invalidates_heart_rate() {
    let slot = ReadingSlot::new();
    // Middle digit mid-transition: A, B and C lit is no glyph
    let smeared = SegmentState::DARK
        .with_line(SegmentLine::A, true)
        .with_line(SegmentLine::B, true)
        .with_line(SegmentLine::C, true);
    let frame = DisplayFrame::dark().digit(50, 0).raw(10, smeared).digit(2, 0);
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::showing(frame), NoDelay, &slot);

    let reading = decoder.refresh().unwrap();

    assert_eq!(reading.heart_rate(), None);
    assert_eq!(
        reading.heart_rate_digits(),
        [DecodedDigit::from_index(0), DecodedDigit::UNREADABLE, DecodedDigit::from_index(0)]
    );
    assert!(reading.is_scanned());
}

#[test]
fn test_probe_priority_prefers_earlier_candidate() {
    let resolver: LayoutResolver = LayoutResolver::default();
    // Satisfies the probes of layout 0 (142 lit, 181 dark) and layout 1
    // (136 lit, 62 dark) at the same time
    let frame = DisplayFrame::dark().digit(142, 9).digit(136, 4);

    let resolved = resolver.resolve(&frame.to_cycle());
    assert_eq!(resolved.layout_id, CANDIDATE_LAYOUTS[0].layout.id);
    assert!(!resolved.used_fallback);
}

#[test]
fn test_successive_passes_track_display() {
    let slot = ReadingSlot::new();
    let frames = vec![
        scenarios::candidate(4, 64, 98).frame,
        scenarios::candidate(4, 66, 97).frame,
        scenarios::fallback(70, 96).frame,
    ];
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::new(frames), NoDelay, &slot);

    let passes = decoder.pump_edges(&mut EdgeTrain::new(REFRESH_THRESHOLD * 3)).unwrap();
    assert_eq!(passes, 3);

    let reading = slot.load();
    assert_eq!(reading.heart_rate(), Some(70));
    assert_eq!(reading.layout_id(), Some(FALLBACK_LAYOUT.id));
    assert_eq!(slot.generation(), 3);
}

#[test]
fn test_bus_fault_keeps_previous_reading() {
    let slot = ReadingSlot::new();
    let frames = vec![
        scenarios::fallback(80, 99).frame,
        scenarios::fallback(81, 99).frame,
        scenarios::fallback(82, 99).frame,
    ];
    let bus = ScriptedDisplay::new(frames).failing_at(1, 120);
    let mut decoder = DisplayDecoder::new(bus, NoDelay, &slot);

    assert_eq!(decoder.refresh().unwrap().heart_rate(), Some(80));

    let err = decoder.refresh().unwrap_err();
    assert_eq!(err, ScanError::LineUnreadable { line: SegmentLine::G, position: 120 });
    assert_eq!(slot.load().heart_rate(), Some(80));
    assert_eq!(slot.generation(), 1);

    assert_eq!(decoder.refresh().unwrap().heart_rate(), Some(82));
}

#[test]
fn test_pump_stops_at_fault() {
    let slot = ReadingSlot::new();
    let bus = ScriptedDisplay::showing(scenarios::fallback(90, 95).frame).failing_at(0, 3);
    let mut decoder = DisplayDecoder::new(bus, NoDelay, &slot);
    let mut edges = EdgeTrain::new(REFRESH_THRESHOLD * 2);

    assert!(decoder.pump_edges(&mut edges).is_err());
    assert_eq!(edges.remaining, REFRESH_THRESHOLD);
    assert_eq!(slot.load(), Reading::UNREAD);

    assert_eq!(decoder.pump_edges(&mut edges), Ok(1));
    assert_eq!(slot.load().heart_rate(), Some(90));
}

#[test]
fn test_static_slot_polling() {
    static LATEST: ReadingSlot = ReadingSlot::new();

    let frame = scenarios::fallback(101, 94).frame;
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::showing(frame), NoDelay, &LATEST);
    let mut seen = 0;

    assert_eq!(LATEST.poll_newer(&mut seen), Err(nb::Error::WouldBlock));
    assert_eq!(LATEST.load().heart_rate(), None);
    assert!(!LATEST.load().is_scanned());

    edges_until_pass(&mut decoder);

    let reading = LATEST.poll_newer(&mut seen).unwrap();
    assert_eq!(reading.heart_rate(), Some(101));
    assert_eq!(seen, 1);
    assert_eq!(LATEST.poll_newer(&mut seen), Err(nb::Error::WouldBlock));

    // Reading without a new pass keeps returning the stale value
    assert_eq!(LATEST.load(), reading);
}

#[test]
fn test_custom_components() {
    const SHORT: usize = 16;

    let fallback = DisplayLayout::new(1, [0, 1, 2], [3, 4]);
    let alternate = CandidateLayout::new(Probe::new(10, 11), DisplayLayout::new(2, [5, 6, 7], [8, 9]));
    let resolver = LayoutResolver::<SHORT>::new(fallback)
        .and_then(|resolver| resolver.with_candidate(alternate))
        .unwrap();

    // Lit positions 5..=10 select the alternate layout
    let frame = DisplayFrame::dark()
        .digit(5, 1)
        .digit(6, 4)
        .digit(7, 2)
        .digit(8, 9)
        .digit(9, 9)
        .digit(10, 0);

    let slot = ReadingSlot::new();
    let scanner = SamplingCycleScanner::<_, _, SHORT>::new(ScriptedDisplay::showing(frame), NoDelay);
    let mut decoder = DisplayDecoder::from_parts(PeriodicRefreshGate::new(2), scanner, resolver, &slot);

    assert_eq!(decoder.on_edge_event(), Ok(None));
    let reading = decoder.on_edge_event().unwrap().unwrap();

    assert_eq!(reading.heart_rate(), Some(142));
    assert_eq!(reading.layout_id(), Some(2));
    assert_eq!(decoder.scanner_mut().bus_mut().reads, SHORT);
}

#[test]
fn test_reading_display_text() {
    let slot = ReadingSlot::new();
    assert_eq!(
        slot.load().to_string(),
        "heart rate ??? (invalid), SpO2 ??, no scan yet"
    );

    let frame = scenarios::fallback(72, 98).frame;
    let mut decoder = DisplayDecoder::new(ScriptedDisplay::showing(frame), NoDelay, &slot);
    decoder.refresh().unwrap();

    assert_eq!(
        slot.load().to_string(),
        "heart rate 072 (72 bpm), SpO2 98, layout 5"
    );
}

// Property-based tests
mod property_tests {
    use super::*;
    use oximeter_core::{decode_segments, encode_digit};
    use proptest::prelude::*;

    fn any_digit() -> impl Strategy<Value = DecodedDigit> {
        prop_oneof![
            (0u8..10).prop_map(DecodedDigit::from_index),
            Just(DecodedDigit::UNREADABLE),
        ]
    }

    proptest! {
        #[test]
        fn prop_decode_is_exact_inverse_of_encode(bits in 0u8..128) {
            let state = SegmentState::from_bits(bits);
            match decode_segments(state).value() {
                Some(value) => {
                    prop_assert!(value <= 9);
                    prop_assert_eq!(encode_digit(value), Some(state));
                }
                None => {
                    prop_assert!((0..10).all(|d| encode_digit(d) != Some(state)));
                }
            }
        }

        #[test]
        fn prop_compose_matches_arithmetic(a in 0u8..10, b in 0u8..10, c in 0u8..10) {
            let digits = [a, b, c].map(DecodedDigit::from_index);
            let expected = u32::from(a) * 100 + u32::from(b) * 10 + u32::from(c);
            prop_assert_eq!(compose_digits(&digits), Some(expected));
        }

        #[test]
        fn prop_any_unreadable_digit_invalidates(digits in proptest::array::uniform3(any_digit())) {
            let composed = compose_digits(&digits);
            if digits.iter().all(|d| d.is_readable()) {
                prop_assert!(composed.is_some());
            } else {
                prop_assert_eq!(composed, None);
            }
        }

        #[test]
        fn prop_fallback_frame_round_trips(heart_rate in 0u32..1000, spo2 in 0u32..100) {
            let resolver: LayoutResolver = LayoutResolver::default();
            let scenario = scenarios::fallback(heart_rate, spo2);
            let resolved = resolver.resolve(&scenario.frame.to_cycle());

            prop_assert!(resolved.used_fallback);
            let reading = Reading::from_resolved(&resolved);
            prop_assert_eq!(reading.heart_rate(), Some(heart_rate));
            prop_assert_eq!(compose_digits(&reading.spo2_digits()), Some(spo2));
        }

        #[test]
        fn prop_slot_returns_last_store(heart_rates in proptest::collection::vec(0u32..1000, 1..20)) {
            let slot = ReadingSlot::new();
            let resolver: LayoutResolver = LayoutResolver::default();

            for &heart_rate in &heart_rates {
                let cycle = scenarios::fallback(heart_rate, 95).frame.to_cycle();
                slot.store(&Reading::from_resolved(&resolver.resolve(&cycle)));
            }

            prop_assert_eq!(slot.load().heart_rate(), heart_rates.last().copied());
            prop_assert_eq!(usize::from(slot.generation()), heart_rates.len());
        }
    }
}

//! Error Handling Example
//!
//! Shows what the decoder does when the display cannot be read: digits
//! caught mid-transition, a blank display, a failing segment line, and a
//! layout table that does not fit the sampling cycle.
//!
//! ## Error Categories
//!
//! 1. **Unreadable digits** - not an error; the heart rate is `None`
//! 2. **Bus faults** - `ScanError`, the previous reading stays published
//! 3. **Layout configuration** - `LayoutError`, caught when building the table
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_error_handling
//! ```

use oximeter_core::{
    constants::{FALLBACK_LAYOUT, SAMPLES_PER_CYCLE},
    encode_digit, BusFault, CandidateLayout, DisplayDecoder, DisplayLayout, LayoutError,
    LayoutResolver, NoDelay, Probe, ReadingSlot, SegmentBus, SegmentLine, SegmentState,
};

#[derive(Clone, Copy)]
enum Mode {
    Steady,
    Transition,
    Blank,
    BrokenLine,
}

/// Display stuck at 75 bpm whose behavior can be switched between passes
struct FaultyDisplay {
    mode: Mode,
    position: usize,
}

impl SegmentBus for FaultyDisplay {
    fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
        let position = self.position;
        self.position = (self.position + 1) % SAMPLES_PER_CYCLE;

        let [hundreds, tens, ones] = FALLBACK_LAYOUT.heart_rate;
        let digit = match position {
            p if p == hundreds => Some(0),
            p if p == tens => Some(7),
            p if p == ones => Some(5),
            _ => None,
        };

        match (self.mode, digit) {
            (Mode::BrokenLine, _) if position == 100 => {
                self.position = 0;
                Err(BusFault::Line(SegmentLine::E))
            }
            (Mode::Blank, _) | (_, None) => Ok(SegmentState::DARK),
            // Tens digit caught while switching: segments of two glyphs at once
            (Mode::Transition, Some(7)) => Ok(SegmentState::from_bits(0b011_1011)),
            (_, Some(value)) => Ok(encode_digit(value).unwrap_or(SegmentState::DARK)),
        }
    }
}

fn main() {
    println!("Oximeter Error Handling Example");
    println!("===============================\n");

    let slot = ReadingSlot::new();
    let display = FaultyDisplay { mode: Mode::Steady, position: 0 };
    let mut decoder = DisplayDecoder::new(display, NoDelay, &slot);

    for (label, mode) in [
        ("steady display", Mode::Steady),
        ("digit in transition", Mode::Transition),
        ("blank display", Mode::Blank),
        ("broken segment line", Mode::BrokenLine),
        ("recovered", Mode::Steady),
    ] {
        decoder.scanner_mut().bus_mut().mode = mode;

        match decoder.refresh() {
            Ok(reading) => match reading.heart_rate() {
                Some(bpm) => println!("  ✓ {:22} {} bpm", label, bpm),
                None => println!("  ? {:22} invalid, digits {:?}", label, reading.heart_rate_digits()),
            },
            Err(e) => println!("  ✗ {:22} {} (still publishing {})", label, e, slot.load()),
        }
    }

    println!("\nLayout configuration errors:");

    let out_of_range = LayoutResolver::<SAMPLES_PER_CYCLE>::new(DisplayLayout::new(6, [50, 10, 240], [179, 59]));
    report(out_of_range.map(|_| ()));

    let bad_id = LayoutResolver::<SAMPLES_PER_CYCLE>::new(FALLBACK_LAYOUT).and_then(|resolver| {
        resolver.with_candidate(CandidateLayout::new(
            Probe::new(20, 21),
            DisplayLayout::new(15, [22, 23, 24], [25, 26]),
        ))
    });
    report(bad_id.map(|_| ()));
}

fn report(result: Result<(), LayoutError>) {
    match result {
        Ok(()) => println!("  ✓ layout table accepted"),
        Err(e) => println!("  ✗ {}", e),
    }
}

//! Basic Display Decoding Example
//!
//! Feeds a simulated oximeter display through the decoder and prints the
//! heart rate the way a polling loop would see it.
//!
//! ## What You'll Learn
//!
//! - Implementing `SegmentBus` for your own hardware
//! - Sharing the latest reading through a `static ReadingSlot`
//! - Driving the decoder from edge events
//! - Telling "no reading" apart from a real value
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_decoding
//! ```

use oximeter_core::{
    constants::{FALLBACK_LAYOUT, REFRESH_THRESHOLD, SAMPLES_PER_CYCLE},
    encode_digit, BusFault, DisplayDecoder, NoDelay, ReadingSlot, SegmentBus, SegmentState,
};

static LATEST: ReadingSlot = ReadingSlot::new();

/// Simulated display counting the heart rate up by one every pass
struct SimulatedDisplay {
    heart_rate: u32,
    position: usize,
}

impl SimulatedDisplay {
    fn digit_at(&self, position: usize) -> Option<u8> {
        let [hundreds, tens, ones] = FALLBACK_LAYOUT.heart_rate;
        let [spo2_tens, spo2_ones] = FALLBACK_LAYOUT.spo2;
        match position {
            p if p == hundreds => Some((self.heart_rate / 100 % 10) as u8),
            p if p == tens => Some((self.heart_rate / 10 % 10) as u8),
            p if p == ones => Some((self.heart_rate % 10) as u8),
            p if p == spo2_tens => Some(9),
            p if p == spo2_ones => Some(7),
            _ => None,
        }
    }
}

impl SegmentBus for SimulatedDisplay {
    fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
        let state = self
            .digit_at(self.position)
            .and_then(encode_digit)
            .unwrap_or(SegmentState::DARK);

        self.position += 1;
        if self.position == SAMPLES_PER_CYCLE {
            self.position = 0;
            self.heart_rate += 1;
        }
        Ok(state)
    }
}

fn main() {
    println!("Oximeter Display Decoding Example");
    println!("=================================\n");

    let display = SimulatedDisplay { heart_rate: 68, position: 0 };
    let mut decoder = DisplayDecoder::new(display, NoDelay, &LATEST);

    println!("Before any pass: {}", LATEST.load());
    println!();

    // Every edge goes through the gate; only every 50th runs a pass
    let mut seen = 0;
    for edge in 1..=REFRESH_THRESHOLD * 4 {
        if let Err(e) = decoder.on_edge_event() {
            println!("  edge {:3}: pass failed: {}", edge, e);
        }

        if let Ok(reading) = LATEST.poll_newer(&mut seen) {
            match reading.heart_rate() {
                Some(bpm) => println!("  edge {:3}: {} bpm ({})", edge, bpm, reading),
                None => println!("  edge {:3}: no valid heart rate ({})", edge, reading),
            }
        }
    }

    println!();
    println!("Passes completed: {}", LATEST.generation());
}

//! Minimal counter registry for the client engine.
//!
//! No external dependencies; a single signaling session needs only scalar
//! counters, rendered in Prometheus text exposition format on demand.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter.
#[derive(Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

#[derive(Default)]
pub struct EngineMetrics {
    pub frames_in: Counter,
    pub frames_out: Counter,
    pub decode_errors: Counter,
    pub unroutable: Counter,
    pub handler_errors: Counter,
    pub candidates_filtered: Counter,
    pub candidates_dropped_no_room: Counter,
}

impl EngineMetrics {
    /// Render all counters.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.frames_in.render("sigbeam_frames_in_total", &mut out);
        self.frames_out.render("sigbeam_frames_out_total", &mut out);
        self.decode_errors.render("sigbeam_decode_errors_total", &mut out);
        self.unroutable.render("sigbeam_unroutable_total", &mut out);
        self.handler_errors.render("sigbeam_handler_errors_total", &mut out);
        self.candidates_filtered.render("sigbeam_candidates_filtered_total", &mut out);
        self.candidates_dropped_no_room.render("sigbeam_candidates_dropped_no_room_total", &mut out);
        out
    }
}

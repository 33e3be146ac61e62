//! # Text Ticket Printer
//!
//! Renders a fixed-width parking ticket and writes it to any [`Write`] sink
//! (a file, stdout, a raw printer socket).

use std::io::Write;

use anyhow::Context;
use parking_lot::Mutex;
use parkr_common::parking::assignment::{Assignment, Receipt};
use parkr_core::ports::TicketPrinter;

pub const TICKET_WIDTH: usize = 32;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct TextTicketPrinter<W: Write + Send> {
    sink: Mutex<W>,
}

impl<W: Write + Send> TextTicketPrinter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn emit(&self, text: &str) -> std::io::Result<()> {
        let mut sink = self.sink.lock();
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }
}

impl<W: Write + Send> TicketPrinter for TextTicketPrinter<W> {
    fn print_ticket(&self, plate: &str, assignment: &Assignment) -> anyhow::Result<()> {
        self.emit(&render_ticket(plate, assignment))
            .with_context(|| format!("writing ticket {}", assignment.token))
    }

    fn print_receipt(&self, plate: &str, receipt: &Receipt) -> anyhow::Result<()> {
        self.emit(&render_receipt(plate, receipt))
            .with_context(|| format!("writing receipt {}", receipt.token))
    }
}

pub fn render_ticket(plate: &str, a: &Assignment) -> String {
    let rows = [
        ("Token", a.token.clone()),
        ("Vehicle", plate.to_string()),
        ("Lot", a.lot_name.clone()),
        ("Slot", a.assigned_slot.clone()),
        ("Distance", format!("{} km", a.distance_km)),
        ("Duration", a.duration_label()),
        ("Est. cost", format!("${:.2}", a.estimated_cost)),
        ("Confidence", format!("{:.1}%", a.confidence_score)),
    ];
    render("PARKING TOKEN", &rows)
}

pub fn render_receipt(plate: &str, r: &Receipt) -> String {
    let rows = [
        ("Token", r.token.clone()),
        ("Vehicle", plate.to_string()),
        ("Lot", r.lot_name.clone()),
        ("Slot", r.assigned_slot.clone()),
        ("Entry", r.entry_time.format(TIME_FORMAT).to_string()),
        ("Exit", r.exit_time.format(TIME_FORMAT).to_string()),
        ("Duration", r.duration_label()),
        ("Paid", format!("${:.2}", r.amount_paid)),
    ];
    render("PARKING RECEIPT", &rows)
}

fn render(title: &str, rows: &[(&str, String)]) -> String {
    let rule = "=".repeat(TICKET_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{title:^width$}\n", width = TICKET_WIDTH));
    out.push_str(&rule);
    out.push('\n');
    for (key, value) in rows {
        out.push_str(&format!("{key:<10}: {value}\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

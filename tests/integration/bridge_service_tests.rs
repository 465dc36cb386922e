//! Integration tests for the serial → frame reader → radio pipeline.
//!
//! Frames are injected into the mock serial port and consumed by
//! `BridgeService::poll`, one byte per poll unless a test says otherwise.

use crate::mock_hw::{MockRf, MockSerial, RecordingSink, RfCall};

use rcsnitch::adapters::log_sink::LogEventSink;
use rcsnitch::app::commands::{BridgeCommand, Rejection, RfCode};
use rcsnitch::app::events::BridgeEvent;
use rcsnitch::app::ports::RfReceiver;
use rcsnitch::app::service::BridgeService;
use rcsnitch::config::BridgeConfig;
use rcsnitch::protocol::frame::ReaderState;

struct Bench {
    bridge: BridgeService,
    rf: MockRf,
    serial: MockSerial,
    sink: RecordingSink,
}

impl Bench {
    fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    fn with_config(config: BridgeConfig) -> Self {
        let mut bench = Self {
            bridge: BridgeService::new(config),
            rf: MockRf::new(),
            serial: MockSerial::new(),
            sink: RecordingSink::new(),
        };
        bench.bridge.start(&mut bench.rf, &mut bench.sink);
        bench
    }

    fn poll(&mut self) {
        self.bridge
            .poll(&mut self.rf, &mut self.serial, &mut self.sink);
    }

    fn poll_n(&mut self, n: usize) {
        for _ in 0..n {
            self.poll();
        }
    }

    /// Poll until the serial input is drained.
    fn drain(&mut self) {
        while !self.serial.rx.is_empty() {
            self.poll();
        }
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_enables_receiver_and_reports_nothing() {
    let mut b = Bench::new();
    assert_eq!(b.rf.calls, vec![RfCall::Enable]);
    assert!(b.bridge.receiver_enabled());
    assert_eq!(
        b.sink.events,
        vec![BridgeEvent::Started {
            receiver_enabled: true
        }]
    );

    b.poll_n(10);
    assert!(b.serial.tx.is_empty());
    assert_eq!(b.bridge.reader_state(), ReaderState::Idle);
}

#[test]
fn boot_with_receiver_disabled() {
    let b = Bench::with_config(BridgeConfig {
        receiver_enabled_at_boot: false,
        ..BridgeConfig::default()
    });
    assert_eq!(b.rf.calls, vec![RfCall::Disable]);
    assert!(!b.bridge.receiver_enabled());
}

// ── Transmit ──────────────────────────────────────────────────

#[test]
fn transmit_frame_fires_on_last_byte() {
    let mut b = Bench::new();
    b.serial.inject(&[0x47, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x10]);

    b.poll_n(7);
    assert!(b.rf.sends().is_empty(), "no send before the frame completes");
    assert_eq!(
        b.bridge.reader_state(),
        ReaderState::Accumulating {
            expected: 7,
            collected: 6
        }
    );

    b.poll();
    assert_eq!(b.rf.sends(), vec![(256, 16)]);
    assert_eq!(b.bridge.reader_state(), ReaderState::Idle);
    assert_eq!(b.bridge.stats().codes_transmitted, 1);
    assert!(b.sink.events.contains(&BridgeEvent::CodeTransmitted(RfCode::new(256, 16))));
}

#[test]
fn whole_frame_in_one_poll_with_larger_budget() {
    let mut b = Bench::with_config(BridgeConfig {
        max_bytes_per_poll: 16,
        ..BridgeConfig::default()
    });
    b.serial
        .inject(&BridgeCommand::Transmit(RfCode::new(5393, 24)).to_wire());
    b.poll();
    assert_eq!(b.rf.sends(), vec![(5393, 24)]);
}

#[test]
fn own_transmission_is_not_reported() {
    let mut b = Bench::new();
    b.serial
        .inject(&BridgeCommand::Transmit(RfCode::new(0x1555, 24)).to_wire());
    b.drain();
    b.poll_n(5);

    assert_eq!(b.rf.sends(), vec![(0x1555, 24)]);
    assert!(b.serial.tx.is_empty(), "self-echo must be suppressed");
    assert_eq!(b.bridge.stats().codes_reported, 0);
}

#[test]
fn header_byte_inside_payload_is_data() {
    let mut b = Bench::new();
    b.serial
        .inject(&[0x47, 0x01, 0x40, 0x00, 0x00, 0x00, 0x00, 0x08]);
    b.drain();
    assert_eq!(b.rf.sends(), vec![(0x4000_0000, 8)]);
}

#[test]
fn garbage_before_header_is_skipped() {
    let mut b = Bench::new();
    b.serial.inject(&[0x00, 0xFF, 0x3F, 0x50]);
    b.serial
        .inject(&BridgeCommand::Transmit(RfCode::new(7, 4)).to_wire());
    b.drain();

    assert_eq!(b.rf.sends(), vec![(7, 4)]);
    assert_eq!(b.bridge.stats().bytes_discarded, 4);
}

// ── Rejected frames ───────────────────────────────────────────

#[test]
fn short_frames_never_act() {
    let mut b = Bench::new();
    b.serial.inject(&[0x40]);
    b.serial.inject(&[0x41, 0x01]);
    b.serial.inject(&[0x42, 0x02, 0x00]);
    b.drain();

    assert_eq!(b.rf.calls, vec![RfCall::Enable], "only the boot enable");
    assert!(b.bridge.receiver_enabled());
    assert_eq!(b.bridge.reader_state(), ReaderState::Idle);
    assert_eq!(
        b.sink.count(|e| matches!(e, BridgeEvent::FrameRejected(Rejection::TooShort { .. }))),
        2
    );
}

#[test]
fn transmit_with_wrong_length_is_dropped() {
    let mut b = Bench::new();
    b.serial.inject(&[0x46, 0x01, 0, 0, 0x01, 0, 0x10]);
    b.drain();

    assert!(b.rf.sends().is_empty());
    assert!(b.sink.events.contains(&BridgeEvent::FrameRejected(
        Rejection::BadTransmitLength { len: 6 }
    )));
}

#[test]
fn unknown_opcode_is_dropped() {
    let mut b = Bench::new();
    b.serial.inject(&[0x43, 0x09, 0x00, 0x00]);
    b.drain();

    assert_eq!(b.rf.calls, vec![RfCall::Enable]);
    assert_eq!(b.bridge.stats().frames_rejected, 1);
}

// ── Receiver mode ─────────────────────────────────────────────

#[test]
fn receiver_toggle_is_idempotent() {
    let mut b = Bench::new();
    let off = BridgeCommand::SetReceiver(false).to_wire();
    b.serial.inject(&off);
    b.serial.inject(&off);
    b.drain();

    assert_eq!(
        b.rf.calls,
        vec![RfCall::Enable, RfCall::Disable, RfCall::Disable]
    );
    assert!(!b.bridge.receiver_enabled());

    b.rf.receive(42);
    b.poll_n(3);
    assert!(b.serial.tx.is_empty(), "nothing is received while disabled");

    b.serial.inject(&BridgeCommand::SetReceiver(true).to_wire());
    b.drain();
    assert!(b.bridge.receiver_enabled());
    assert_eq!(
        b.sink.count(|e| matches!(e, BridgeEvent::ReceiverChanged(_))),
        3
    );
}

#[test]
fn any_nonzero_argument_enables() {
    let mut b = Bench::with_config(BridgeConfig {
        receiver_enabled_at_boot: false,
        ..BridgeConfig::default()
    });
    b.serial.inject(&[0x43, 0x02, 0x7F, 0x00]);
    b.drain();
    assert!(b.bridge.receiver_enabled());
}

// ── Reports ───────────────────────────────────────────────────

#[test]
fn received_code_is_reported_little_endian() {
    let mut b = Bench::new();
    b.rf.receive(0x0102_0304);
    b.poll();

    assert_eq!(b.serial.tx, vec![b'R', 4, 3, 2, 1, b'\n']);
    assert!(!b.rf.is_available());
    assert!(b.sink.events.contains(&BridgeEvent::CodeReported(0x0102_0304)));

    b.poll_n(3);
    assert_eq!(b.serial.tx.len(), 6, "each code is reported once");
}

#[test]
fn failed_report_write_still_clears_flag() {
    let mut b = Bench::new();
    b.serial.fail_writes = true;
    b.rf.receive(99);
    b.poll();

    assert!(!b.rf.is_available());
    assert_eq!(b.bridge.stats().write_errors, 1);
    assert_eq!(b.bridge.stats().codes_reported, 1);
}

#[test]
fn log_sink_accepts_every_event() {
    let mut bridge = BridgeService::new(BridgeConfig::default());
    let mut rf = MockRf::new();
    let mut serial = MockSerial::new();
    let mut sink = LogEventSink::new();

    bridge.start(&mut rf, &mut sink);
    serial.inject(&BridgeCommand::Transmit(RfCode::new(1, 1)).to_wire());
    serial.inject(&[0x43, 0x05, 0x00, 0x00]);
    while !serial.rx.is_empty() {
        bridge.poll(&mut rf, &mut serial, &mut sink);
    }
    rf.receive(3);
    bridge.poll(&mut rf, &mut serial, &mut sink);

    assert_eq!(rf.sends(), vec![(1, 1)]);
    assert_eq!(serial.tx.len(), 6);
}

//! End-to-end tests: `HostLink` on one side of the wire, `BridgeService`
//! on the other.

use chrono::NaiveDate;

use crate::mock_hw::{HostPort, MockRf, MockSerial, RecordingSink, RfCall};

use rcsnitch::app::service::BridgeService;
use rcsnitch::codes::{BinaryCode, TriState};
use rcsnitch::config::BridgeConfig;
use rcsnitch::host::capture::{CaptureRecord, CaptureWriter, Profile};
use rcsnitch::host::link::HostLink;

struct Wire {
    host: HostLink<HostPort>,
    bridge: BridgeService,
    rf: MockRf,
    serial: MockSerial,
    sink: RecordingSink,
}

impl Wire {
    fn new() -> Self {
        let mut wire = Self {
            host: HostLink::new(HostPort::default()),
            bridge: BridgeService::new(BridgeConfig::default()),
            rf: MockRf::new(),
            serial: MockSerial::new(),
            sink: RecordingSink::new(),
        };
        wire.bridge.start(&mut wire.rf, &mut wire.sink);
        wire
    }

    /// Carry bytes both ways and let the bridge run until the host's
    /// output is consumed.
    fn settle(&mut self) {
        let outbound = std::mem::take(&mut self.host.get_mut().tx);
        self.serial.inject(&outbound);
        loop {
            self.bridge
                .poll(&mut self.rf, &mut self.serial, &mut self.sink);
            if self.serial.rx.is_empty() {
                break;
            }
        }
        let inbound = std::mem::take(&mut self.serial.tx);
        self.host.get_mut().rx.extend(inbound);
    }
}

#[test]
fn tri_state_code_reaches_transmitter() {
    let mut w = Wire::new();
    let code: TriState = "0FFF0FFFFFFF".parse().unwrap();
    w.host.send_tri_state(&code).unwrap();
    w.settle();

    let expected = code.to_rf_code();
    assert_eq!(w.rf.sends(), vec![(expected.value, 24)]);
}

#[test]
fn binary_and_decimal_codes_reach_transmitter() {
    let mut w = Wire::new();
    w.host
        .send_binary(&"010100010101".parse::<BinaryCode>().unwrap())
        .unwrap();
    w.host.send_decimal(5393, 24).unwrap();
    w.settle();

    assert_eq!(w.rf.sends(), vec![(0b0101_0001_0101, 12), (5393, 24)]);
}

#[test]
fn host_can_switch_receiver_off_and_on() {
    let mut w = Wire::new();
    w.host.disable_receiver().unwrap();
    w.settle();
    assert!(!w.bridge.receiver_enabled());

    w.rf.receive(1234);
    w.settle();
    assert_eq!(w.host.sniff_single().unwrap(), None);

    w.host.enable_receiver().unwrap();
    w.settle();
    assert!(w.bridge.receiver_enabled());
    assert_eq!(
        w.rf.calls,
        vec![RfCall::Enable, RfCall::Disable, RfCall::Enable]
    );
}

#[test]
fn bare_two_byte_receiver_frame_is_ignored_by_device() {
    let mut w = Wire::new();
    w.host.send_message(&[2, 0]).unwrap();
    w.settle();
    assert!(w.bridge.receiver_enabled());
}

#[test]
fn received_codes_reach_host_in_order() {
    let mut w = Wire::new();
    // 0x0A0A0A0A is full of newline bytes.
    for value in [5393, 0x0A0A_0A0A, 0x00FF_FFFF] {
        w.rf.receive(value);
        w.settle();
    }
    assert_eq!(
        w.host.sniff_multiple().unwrap(),
        vec![5393, 0x0A0A_0A0A, 0x00FF_FFFF]
    );
}

#[test]
fn transmit_does_not_echo_back_to_host() {
    let mut w = Wire::new();
    w.host.send_decimal(77, 24).unwrap();
    w.settle();
    w.settle();
    assert!(w.host.sniff_multiple().unwrap().is_empty());
}

#[test]
fn sniffed_codes_round_trip_through_capture_profile() {
    let mut w = Wire::new();
    let on: TriState = "F0FFF0FFFFFF".parse().unwrap();
    w.rf.receive(on.to_rf_code().value);
    w.settle();
    let value = w.host.sniff_single().unwrap().unwrap();

    let at = NaiveDate::from_ymd_opt(2026, 5, 4)
        .unwrap()
        .and_hms_micro_opt(21, 15, 3, 250)
        .unwrap();
    let record = CaptureRecord::new(at, value);
    assert_eq!(record.code, on);
    assert!(record.is_on());

    let mut writer = CaptureWriter::new(Vec::new(), true).unwrap();
    writer.append(&record).unwrap();
    let profile = Profile::from_reader(writer.into_inner().as_slice()).unwrap();

    let rendered = profile.render();
    assert_eq!(
        rendered,
        "Device G-2 D-B:\n\t2026-05-04:\n\t\tAt 21:15 the device was turned ON.\n"
    );
}
